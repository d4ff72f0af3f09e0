use glam::Vec3;

use super::*;
use crate::types::SamplePoint;

fn run(sequencer: &mut GridSequencer) -> Vec<FrameStep> {
  let mut steps = Vec::new();
  while !sequencer.is_done() {
    steps.push(sequencer.step().unwrap());
  }
  steps
}

// =========================================================================
// Batch 1: Polyhedron grid
// =========================================================================

/// Level 0: twelve captures, then previews.
#[test]
fn test_polyhedron_level_0_runs_twelve_frames() {
  let mut sequencer = GridSequencer::on_polyhedron(1.3, 0);
  assert_eq!(sequencer.total_count(), 12);

  let steps = run(&mut sequencer);
  assert_eq!(steps.len(), 12);
  for (i, step) in steps.iter().enumerate() {
    assert!(!step.is_final_frame_preview());
    assert_eq!(step.image_index(), Some(i as u32));
  }

  let preview = sequencer.step().unwrap();
  assert!(preview.is_final_frame_preview());
}

/// The last capture is the step that enters DONE.
#[test]
fn test_done_after_last_capture() {
  let mut sequencer = GridSequencer::on_polyhedron(1.3, 0);
  for _ in 0..11 {
    sequencer.step().unwrap();
  }
  assert!(!sequencer.is_done());

  let last = sequencer.step().unwrap();
  assert!(matches!(last, FrameStep::Capture { image_index: 11, .. }));
  assert!(sequencer.is_done());
}

/// Preview re-shows the first sample and never changes.
#[test]
fn test_preview_is_idempotent() {
  let mut sequencer = GridSequencer::on_polyhedron(2.0, 1);
  run(&mut sequencer);

  let first = sequencer.step().unwrap();
  let first_pose = *first.pose().unwrap();
  let expected_eye = sequencer.samples().points[0].normal * 2.0;
  assert_eq!(first_pose.eye, expected_eye);

  for _ in 0..5 {
    let again = sequencer.step().unwrap();
    assert!(again.is_final_frame_preview());
    assert_eq!(*again.pose().unwrap(), first_pose);
  }
}

/// Each capture looks from the sample direction at the given distance.
#[test]
fn test_capture_eye_positions() {
  let mut sequencer = GridSequencer::on_polyhedron(1.7, 1);
  let directions: Vec<Vec3> = sequencer.samples().directions().collect();

  for (direction, step) in directions.iter().zip(run(&mut sequencer)) {
    let pose = step.pose().unwrap();
    assert!((pose.eye - *direction * 1.7).length() < 1e-6);
    assert!(pose.is_finite());
  }
}

// =========================================================================
// Batch 2: Sphere grid
// =========================================================================

/// Lat/long grid has 2 + (rows - 1) * 2 * segments frames, all finite.
#[test]
fn test_sphere_grid_frames() {
  let mut sequencer = GridSequencer::on_sphere(1.3, 6, 5);
  assert_eq!(sequencer.total_count(), 2 + 4 * 12);

  let steps = run(&mut sequencer);
  assert_eq!(steps.len(), 50);
  assert!(steps.iter().all(|s| s.pose().unwrap().is_finite()));

  let first = steps[0].pose().unwrap();
  assert!((first.eye - Vec3::new(0.0, 0.0, 1.3)).length() < 1e-6);
}

// =========================================================================
// Batch 3: Edge cases
// =========================================================================

/// Straight up and straight down yield finite views.
#[test]
fn test_pole_samples_are_finite() {
  let samples = SampleSet {
    points: [Vec3::Y, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::X]
      .into_iter()
      .map(SamplePoint::on_sphere)
      .collect(),
    triangles: Vec::new(),
  };
  let mut sequencer = GridSequencer::from_samples(samples, 1.3);

  for step in run(&mut sequencer) {
    assert!(step.pose().unwrap().is_finite());
  }
  assert!(sequencer.step().unwrap().pose().unwrap().is_finite());
}

/// An empty sample set starts done and previews from +Z.
#[test]
fn test_empty_samples_start_done() {
  let mut sequencer = GridSequencer::from_samples(SampleSet::new(), 1.3);

  assert!(sequencer.is_done());
  assert_eq!(sequencer.total_count(), 0);
  let step = sequencer.step().unwrap();
  assert!(step.is_final_frame_preview());
  assert_eq!(step.pose().unwrap().eye, Vec3::new(0.0, 0.0, 1.3));
}

/// Unusable distances fall back to the default.
#[test]
fn test_distance_floor() {
  assert_eq!(GridSequencer::on_polyhedron(0.0, 0).camera_distance(), 1.3);
  assert_eq!(GridSequencer::on_polyhedron(-4.0, 0).camera_distance(), 1.3);
  assert_eq!(GridSequencer::on_polyhedron(3.0, 0).camera_distance(), 3.0);
}
