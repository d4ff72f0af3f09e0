//! Breadth-first pose tree construction.
//!
//! A FIFO queue starts with the root. Each popped node at level `k` takes
//! children from the level `k + 1` sample set:
//!
//! 1. Root (no direction): every level-0 point, in index order.
//! 2. Otherwise: the [`CHILD_FAN_OUT`] points nearest to the node's own
//!    direction (all of them if the level has fewer).
//!
//! Distance ties resolve by ascending point index (stable sort), so repeated
//! builds produce identical trees. Nodes on the last level get no children
//! and simply leave the queue.

use std::collections::VecDeque;

use glam::Vec3;

use super::{PoseNode, PoseTree};
use crate::constants::{CHILD_FAN_OUT, ROOT_ID};
use crate::geodesic;
use crate::types::{SamplePoint, SampleSet};

impl PoseTree {
  /// Build the tree over geodesic levels `0..=max_level`.
  ///
  /// `max_level < 0` yields the root alone.
  pub fn build(max_level: i32) -> Self {
    let levels = if max_level < 0 {
      Vec::new()
    } else {
      geodesic::create_levels(max_level as u32)
    };
    Self::from_levels(&levels)
  }

  /// Build the tree over caller-supplied per-level sample sets.
  ///
  /// `levels[k]` supplies the children of level `k - 1` nodes. An empty level
  /// contributes no children.
  pub fn from_levels(levels: &[SampleSet]) -> Self {
    let _span = tracing::info_span!("pose_tree::build", levels = levels.len()).entered();

    let mut tree = PoseTree::new();
    let mut queue = VecDeque::from([ROOT_ID]);

    while let Some(parent_id) = queue.pop_front() {
      let (parent_level, parent_point) = {
        let parent = &tree.nodes()[parent_id];
        (parent.level, parent.sample_point)
      };

      let next_level = parent_level + 1;
      let Some(samples) = levels.get(next_level as usize) else {
        continue;
      };

      for point_index in select_children(parent_point, &samples.points) {
        let direction = samples.points[point_index].direction;
        let child = PoseNode::new(0, next_level, parent_id, direction, point_index);
        queue.push_back(tree.push_child(child));
      }
    }

    tracing::info!(nodes = tree.len(), max_level = tree.max_level(), "built pose tree");
    tree
  }
}

/// Indices of the points that become children of a node at `origin`.
///
/// `None` (the root) takes every point in index order.
pub fn select_children(origin: Option<Vec3>, points: &[SamplePoint]) -> Vec<usize> {
  match origin {
    None => (0..points.len()).collect(),
    Some(origin) => {
      let mut nearest = nearest_neighbors(origin, points);
      nearest.truncate(CHILD_FAN_OUT);
      nearest
    }
  }
}

/// All point indices ordered by ascending distance to `origin`; ties keep
/// ascending index order.
pub fn nearest_neighbors(origin: Vec3, points: &[SamplePoint]) -> Vec<usize> {
  let distances: Vec<f32> = points
    .iter()
    .map(|p| p.direction.distance(origin))
    .collect();

  let mut indices: Vec<usize> = (0..points.len()).collect();
  indices.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
  indices
}
