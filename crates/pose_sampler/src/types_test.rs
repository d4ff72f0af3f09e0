use glam::{Mat4, Vec3};

use super::*;

// =========================================================================
// Batch 1: SampleSet
// =========================================================================

/// Hemisphere filter keeps points with y >= 0 and forgets the triangles.
#[test]
fn test_retain_upper_hemisphere() {
  let mut set = SampleSet {
    points: vec![
      SamplePoint::on_sphere(Vec3::Y),
      SamplePoint::on_sphere(Vec3::NEG_Y),
      SamplePoint::on_sphere(Vec3::X),
    ],
    triangles: vec![[0, 1, 2]],
  };

  set.retain_upper_hemisphere();

  assert_eq!(set.len(), 2);
  assert_eq!(set.triangle_count(), 0);
  assert!(set.directions().all(|d| d.y >= 0.0));
}

/// Sphere samples carry their direction as normal.
#[test]
fn test_sample_point_on_sphere() {
  let p = SamplePoint::on_sphere(Vec3::Z);
  assert_eq!(p.direction, p.normal);
}

// =========================================================================
// Batch 2: ViewPose / FrameStep
// =========================================================================

/// look_at matches glam's right-handed look-at matrix.
#[test]
fn test_view_pose_matches_look_at_rh() {
  let eye = Vec3::new(0.0, 0.0, 2.0);
  let pose = ViewPose::look_at(eye, Vec3::ZERO, Vec3::Y);

  assert_eq!(pose.view, Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y));
  assert!(pose.is_finite());
  // Scene center lands on the camera's -Z axis.
  let center_in_camera = pose.view.transform_point3(Vec3::ZERO);
  assert!((center_in_camera - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
}

/// Only previews report the final-frame flag; only captures carry an index.
#[test]
fn test_frame_step_accessors() {
  let pose = ViewPose::look_at(Vec3::Z, Vec3::ZERO, Vec3::Y);

  let capture = FrameStep::Capture {
    pose,
    image_index: 4,
  };
  assert!(!capture.is_final_frame_preview());
  assert_eq!(capture.image_index(), Some(4));
  assert_eq!(capture.pose(), Some(&pose));

  assert!(!FrameStep::Skip.is_final_frame_preview());
  assert!(FrameStep::Skip.pose().is_none());

  let preview = FrameStep::Preview { pose };
  assert!(preview.is_final_frame_preview());
  assert_eq!(preview.image_index(), None);
}
