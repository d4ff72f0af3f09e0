use glam::Vec3;
use tempfile::TempDir;

use super::*;

fn sequencer(dir: &TempDir, max_level: i32) -> TreeWalkSequencer {
  TreeWalkSequencer::new(TreeWalkConfig {
    camera_distance: 1.3,
    max_level,
    output_dir: dir.path().to_path_buf(),
  })
}

fn walk(sequencer: &mut TreeWalkSequencer) -> Vec<FrameStep> {
  let mut steps = Vec::new();
  while !sequencer.is_done() {
    steps.push(sequencer.step().unwrap());
  }
  steps
}

// =========================================================================
// Batch 1: Walk order and image indices
// =========================================================================

/// The root is skipped; every other node is one capture.
#[test]
fn test_root_is_skipped() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 0);
  assert_eq!(seq.total_count(), 13);

  let steps = walk(&mut seq);
  assert_eq!(steps.len(), 13);
  assert_eq!(steps[0], FrameStep::Skip);
  assert!(steps[1..].iter().all(|s| s.image_index().is_some()));
}

/// Image indices count captures only: node id minus one.
#[test]
fn test_image_indices_follow_node_ids() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 1);
  let steps = walk(&mut seq);

  let indices: Vec<u32> = steps.iter().filter_map(|s| s.image_index()).collect();
  let expected: Vec<u32> = (0..seq.tree().len() as u32 - 1).collect();
  assert_eq!(indices, expected);

  for node in seq.tree().nodes().iter().skip(1) {
    assert_eq!(node.image_index, Some(node.id as u32 - 1));
  }
  assert_eq!(seq.tree().root().image_index, None);
}

/// Captures look from each node's direction.
#[test]
fn test_capture_eye_is_node_direction() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 1);
  let steps = walk(&mut seq);

  for step in &steps[1..] {
    let image_index = step.image_index().unwrap();
    let node = seq.tree().node_for_image(image_index).unwrap();
    let pose = step.pose().unwrap();
    assert_eq!(pose.eye, node.sample_point.unwrap() * 1.3);
    assert!(pose.is_finite());
  }
}

// =========================================================================
// Batch 2: Completion
// =========================================================================

/// The tree file appears on the first step after the walk, not before.
#[test]
fn test_tree_written_after_walk() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 1);
  let path = dir.path().join("BPTData.csv");
  assert_eq!(seq.tree_path(), path.as_path());

  walk(&mut seq);
  assert!(!path.exists());

  let step = seq.step().unwrap();
  assert!(step.is_final_frame_preview());
  assert!(path.exists());

  let restored = store::read(&path).unwrap();
  assert_eq!(restored.len(), seq.tree().len());
  for (read, built) in restored.nodes().iter().zip(seq.tree().nodes()) {
    assert_eq!(read.image_index, built.image_index);
    assert_eq!(read.parent, built.parent);
    assert_eq!(read.children, built.children);
  }
}

/// The write happens once no matter how often DONE is polled.
#[test]
fn test_tree_written_once() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 0);
  walk(&mut seq);

  seq.step().unwrap();
  std::fs::remove_file(seq.tree_path()).unwrap();

  for _ in 0..3 {
    assert!(seq.step().unwrap().is_final_frame_preview());
  }
  assert!(!seq.tree_path().exists());
}

/// Preview shows the first level-0 node and stays put.
#[test]
fn test_preview_pose() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, 0);
  walk(&mut seq);

  let first = seq.step().unwrap();
  let expected = seq.tree().node(1).unwrap().sample_point.unwrap() * 1.3;
  assert_eq!(first.pose().unwrap().eye, expected);
  assert_eq!(seq.step().unwrap(), first);
}

/// A failed write is reported once; later steps preview normally.
#[test]
fn test_tree_write_failure() {
  let dir = TempDir::new().unwrap();
  let blocker = dir.path().join("not_a_dir");
  std::fs::write(&blocker, "x").unwrap();

  let mut seq = TreeWalkSequencer::new(TreeWalkConfig {
    camera_distance: 1.3,
    max_level: 0,
    output_dir: blocker.join("out"),
  });
  walk(&mut seq);

  assert!(matches!(seq.step(), Err(SequenceError::TreeWrite(_))));
  assert!(seq.step().unwrap().is_final_frame_preview());
}

/// A root-only tree starts done, writes one record and previews from +Z.
#[test]
fn test_root_only_tree() {
  let dir = TempDir::new().unwrap();
  let mut seq = sequencer(&dir, -1);

  assert!(seq.is_done());
  let step = seq.step().unwrap();
  assert_eq!(step.pose().unwrap().eye, Vec3::new(0.0, 0.0, 1.3));
  assert_eq!(store::read(seq.tree_path()).unwrap().len(), 1);
}
