//! Tree-walk sequencer: renders every pose tree node in id order and saves
//! the tree once the walk is complete.

use std::path::{Path, PathBuf};

use super::{clamp_camera_distance, SequencerState, ViewSequencer};
use crate::constants::{DEFAULT_CAMERA_DISTANCE, ROOT_ID, TREE_FILE_NAME};
use crate::error::SequenceError;
use crate::pose_tree::{store, PoseTree};
use crate::types::FrameStep;

/// Tree-walk sequencer configuration.
#[derive(Clone, Debug)]
pub struct TreeWalkConfig {
  /// Camera distance from the scene center.
  pub camera_distance: f32,

  /// Deepest geodesic level in the tree (`-1` builds the root alone).
  pub max_level: i32,

  /// Directory receiving `BPTData.csv`.
  pub output_dir: PathBuf,
}

impl Default for TreeWalkConfig {
  fn default() -> Self {
    Self {
      camera_distance: DEFAULT_CAMERA_DISTANCE,
      max_level: 1,
      output_dir: PathBuf::from("tree"),
    }
  }
}

/// Walks the pose tree breadth-first (arena order).
///
/// The root comes first and is skipped without an image. Every other node is
/// captured as image `id - 1`, and the index is recorded on the node. The
/// first step after the walk writes the tree file; later steps only preview.
#[derive(Debug)]
pub struct TreeWalkSequencer {
  tree: PoseTree,
  camera_distance: f32,
  tree_path: PathBuf,
  state: SequencerState,
  next_image: u32,
  tree_written: bool,
}

impl TreeWalkSequencer {
  pub fn new(config: TreeWalkConfig) -> Self {
    let tree = PoseTree::build(config.max_level);
    Self::with_tree(tree, config.camera_distance, &config.output_dir)
  }

  /// Walk an already built tree. A root-only tree starts done.
  pub fn with_tree(tree: PoseTree, camera_distance: f32, output_dir: &Path) -> Self {
    let camera_distance = clamp_camera_distance(camera_distance, DEFAULT_CAMERA_DISTANCE);
    let total = if tree.is_empty() { 0 } else { tree.len() };
    Self {
      tree,
      camera_distance,
      tree_path: output_dir.join(TREE_FILE_NAME),
      state: SequencerState::new(total),
      next_image: 0,
      tree_written: false,
    }
  }

  /// Tree being walked; image indices fill in as frames are captured.
  pub fn tree(&self) -> &PoseTree {
    &self.tree
  }

  /// Where the tree file is written.
  pub fn tree_path(&self) -> &Path {
    &self.tree_path
  }

  pub fn camera_distance(&self) -> f32 {
    self.camera_distance
  }

  fn finish(&mut self) -> Result<FrameStep, SequenceError> {
    if !self.tree_written {
      self.tree_written = true;
      tracing::info!("writing pose tree to {}", self.tree_path.display());
      if let Err(e) = store::write(&self.tree_path, &self.tree) {
        tracing::error!("failed to write pose tree: {}", e);
        return Err(e.into());
      }
    }

    let first = self.tree.children(ROOT_ID).next().and_then(|n| n.sample_point);
    let pose = self.state.preview(first, self.camera_distance);
    Ok(FrameStep::Preview { pose })
  }
}

impl ViewSequencer for TreeWalkSequencer {
  fn step(&mut self) -> Result<FrameStep, SequenceError> {
    let Some(id) = self.state.advance() else {
      return self.finish();
    };

    let Some(node) = self.tree.node_mut(id) else {
      return Ok(FrameStep::Skip);
    };
    let Some(direction) = node.sample_point else {
      return Ok(FrameStep::Skip);
    };

    let image_index = self.next_image;
    node.image_index = Some(image_index);
    let (node_id, level) = (node.id, node.level);
    self.next_image += 1;

    let pose = self.state.orient(direction, self.camera_distance);
    tracing::debug!(
      "render image {} for node {} (level: {}) from pos: {:?}",
      image_index,
      node_id,
      level,
      pose.eye
    );

    if self.state.is_done() {
      tracing::info!("DONE - rendered {} images", self.next_image);
    }

    Ok(FrameStep::Capture { pose, image_index })
  }

  fn total_count(&self) -> usize {
    self.state.total()
  }

  fn is_done(&self) -> bool {
    self.state.is_done()
  }
}

#[cfg(test)]
#[path = "tree_walk_test.rs"]
mod tree_walk_test;
