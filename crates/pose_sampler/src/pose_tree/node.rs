//! PoseNode - one camera viewpoint in the pose tree arena.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{CHILD_FAN_OUT, ROOT_ID, ROOT_LEVEL};

/// Dense node identifier; also the node's index in the arena.
pub type NodeId = usize;

/// Pose tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseNode {
  /// Arena index, assigned breadth-first from 0 (root).
  pub id: NodeId,

  /// Subdivision level (-1 for root, parent level + 1 otherwise).
  pub level: i32,

  /// Parent id. Lookup only; ownership is the arena's.
  pub parent: Option<NodeId>,

  /// Child ids in selection order.
  pub children: SmallVec<[NodeId; CHILD_FAN_OUT]>,

  /// Viewpoint direction. `None` for the root and for nodes read from disk.
  pub sample_point: Option<Vec3>,

  /// Sequential index of the image rendered for this node.
  pub image_index: Option<u32>,

  /// Index into the level's sample set this node was created from.
  pub source_point_index: Option<usize>,
}

impl PoseNode {
  /// The synthetic root: no direction, no parent, never rendered.
  pub fn root() -> Self {
    Self::bare(ROOT_ID, ROOT_LEVEL)
  }

  /// Node created from sample `source_point_index` of its level.
  pub fn new(
    id: NodeId,
    level: i32,
    parent: NodeId,
    sample_point: Vec3,
    source_point_index: usize,
  ) -> Self {
    Self {
      parent: Some(parent),
      sample_point: Some(sample_point),
      source_point_index: Some(source_point_index),
      ..Self::bare(id, level)
    }
  }

  /// Node with structure only, as reconstructed from a tree file.
  pub fn bare(id: NodeId, level: i32) -> Self {
    Self {
      id,
      level,
      parent: None,
      children: SmallVec::new(),
      sample_point: None,
      image_index: None,
      source_point_index: None,
    }
  }

  #[inline]
  pub fn is_root(&self) -> bool {
    self.id == ROOT_ID
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
