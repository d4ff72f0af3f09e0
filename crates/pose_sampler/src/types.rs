//! Core data types shared by the sample generators, the pose tree and the
//! sequencers.

use glam::{Mat4, Vec3};

/// A viewpoint direction on the unit sphere with its outward normal.
///
/// On a sphere the normal equals the direction; both are kept so callers that
/// feed other surfaces through the same sequencers keep working.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
  /// Unit direction from the scene center.
  pub direction: Vec3,
  /// Outward surface normal at `direction`.
  pub normal: Vec3,
}

impl SamplePoint {
  /// Sample whose normal is its own direction.
  #[inline]
  pub fn on_sphere(direction: Vec3) -> Self {
    Self {
      direction,
      normal: direction,
    }
  }
}

/// Point set plus triangle index list produced by a sample generator.
#[derive(Clone, Debug, Default)]
pub struct SampleSet {
  /// Deduplicated sample points.
  pub points: Vec<SamplePoint>,
  /// Triangles as indices into `points`. Empty for generators without a
  /// surface (lat/long grid).
  pub triangles: Vec<[u32; 3]>,
}

impl SampleSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of sample points.
  pub fn len(&self) -> usize {
    self.points.len()
  }

  /// Returns true if the set has no points.
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Number of triangles.
  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  /// Sample directions in generation order.
  pub fn directions(&self) -> impl Iterator<Item = Vec3> + '_ {
    self.points.iter().map(|p| p.direction)
  }

  /// Drop every point whose direction has a negative up (+Y) component.
  ///
  /// Triangles are discarded since their indices no longer line up.
  pub fn retain_upper_hemisphere(&mut self) {
    self.points.retain(|p| p.direction.y >= 0.0);
    self.triangles.clear();
  }
}

/// Camera pose handed to the external renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPose {
  /// World-to-camera transform.
  pub view: Mat4,
  /// Camera position in world space.
  pub eye: Vec3,
  /// Up vector the view was composed with.
  pub up: Vec3,
}

impl ViewPose {
  /// Right-handed look-at pose toward `target`.
  pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
    Self {
      view: Mat4::look_at_rh(eye, target, up),
      eye,
      up,
    }
  }

  /// Returns true if every matrix entry is finite.
  pub fn is_finite(&self) -> bool {
    self.view.is_finite()
  }
}

/// Result of one sequencer step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
  /// Render `pose` and save the frame as image `image_index`.
  Capture { pose: ViewPose, image_index: u32 },

  /// Cursor advanced over an entry with nothing to render (the tree root).
  Skip,

  /// Sequence finished: render `pose` for display only, do not save.
  Preview { pose: ViewPose },
}

impl FrameStep {
  /// True for the DONE-state preview.
  #[inline]
  pub fn is_final_frame_preview(&self) -> bool {
    matches!(self, FrameStep::Preview { .. })
  }

  /// Pose to render this frame, if any.
  pub fn pose(&self) -> Option<&ViewPose> {
    match self {
      FrameStep::Capture { pose, .. } | FrameStep::Preview { pose } => Some(pose),
      FrameStep::Skip => None,
    }
  }

  /// Image index the writer should save under.
  pub fn image_index(&self) -> Option<u32> {
    match self {
      FrameStep::Capture { image_index, .. } => Some(*image_index),
      _ => None,
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
