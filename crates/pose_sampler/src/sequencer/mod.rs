//! View sequencers: per-frame camera poses for an external render loop.
//!
//! Every variant is a single-use state machine pulled once per frame:
//!
//! ```text
//!   ADVANCING ──step()──▶ ADVANCING      cursor < total: Capture (or Skip)
//!       │
//!       └──step() on last sample──▶ DONE  still a normal Capture
//!                                     │
//!                                     └──step()──▶ DONE   Preview, same pose every call
//! ```
//!
//! # Module Structure
//!
//! - [`grid`]: one capture per sample of a sphere grid or icosphere
//! - [`tree_walk`]: one capture per pose tree node, then a one-shot tree write
//! - [`random_pose`]: random orientation plus random object offset per frame
//!
//! Shared camera math lives here: [`SequencerState`] carries the cursor, the
//! sticky up vector and the cached preview pose.

pub mod grid;
pub mod random_pose;
pub mod tree_walk;

// Re-exports
pub use grid::GridSequencer;
pub use random_pose::{PoseLimits, RandomPoseConfig, RandomPoseSequencer};
pub use tree_walk::{TreeWalkConfig, TreeWalkSequencer};

use glam::Vec3;

use crate::constants::{MIN_CAMERA_DISTANCE, SCENE_CENTER, UP_DEGENERACY_THRESHOLD, WORLD_UP};
use crate::error::SequenceError;
use crate::types::{FrameStep, ViewPose};

/// Frame-by-frame camera pose source.
///
/// The render loop calls [`step`](ViewSequencer::step) once per frame, renders
/// the returned pose and saves the frame only for [`FrameStep::Capture`].
/// After the last capture every call returns the same [`FrameStep::Preview`].
pub trait ViewSequencer {
  /// Advance one frame.
  fn step(&mut self) -> Result<FrameStep, SequenceError>;

  /// Number of steps taken before the sequencer is done.
  fn total_count(&self) -> usize;

  /// True once every step has been taken.
  fn is_done(&self) -> bool;
}

/// Blanket impl for boxed trait objects.
impl<S: ViewSequencer + ?Sized> ViewSequencer for Box<S> {
  fn step(&mut self) -> Result<FrameStep, SequenceError> {
    (**self).step()
  }

  fn total_count(&self) -> usize {
    (**self).total_count()
  }

  fn is_done(&self) -> bool {
    (**self).is_done()
  }
}

/// Cursor, sticky up vector and cached preview shared by every sequencer.
#[derive(Clone, Debug)]
pub struct SequencerState {
  cursor: usize,
  total: usize,
  up: Vec3,
  preview: Option<ViewPose>,
}

impl SequencerState {
  /// `total == 0` starts done.
  pub fn new(total: usize) -> Self {
    Self {
      cursor: 0,
      total,
      up: WORLD_UP,
      preview: None,
    }
  }

  /// Steps taken so far.
  #[inline]
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  #[inline]
  pub fn total(&self) -> usize {
    self.total
  }

  #[inline]
  pub fn is_done(&self) -> bool {
    self.cursor >= self.total
  }

  /// Up vector the next pose starts from.
  #[inline]
  pub fn up(&self) -> Vec3 {
    self.up
  }

  /// Take one step: the index of the entry to produce, or `None` when done.
  pub fn advance(&mut self) -> Option<usize> {
    if self.is_done() {
      return None;
    }
    let index = self.cursor;
    self.cursor += 1;
    Some(index)
  }

  /// Look-at pose from `direction * distance` toward the scene center.
  ///
  /// Updates the sticky up vector.
  pub fn orient(&mut self, direction: Vec3, distance: f32) -> ViewPose {
    let eye = direction * distance;
    self.up = next_up(eye.normalize_or_zero(), self.up);
    ViewPose::look_at(eye, SCENE_CENTER, self.up)
  }

  /// The DONE-state pose: computed on the first call, then returned as is.
  ///
  /// `direction` is the sample to re-show; `None` falls back to a camera on +Z.
  pub fn preview(&mut self, direction: Option<Vec3>, distance: f32) -> ViewPose {
    if let Some(pose) = self.preview {
      return pose;
    }
    let pose = match direction {
      Some(direction) => self.orient(direction, distance),
      None => ViewPose::look_at(Vec3::Z * distance, SCENE_CENTER, WORLD_UP),
    };
    self.preview = Some(pose);
    pose
  }
}

/// Up vector for a camera looking from `eye_dir` (unit) given the previous up.
///
/// World up unless the eye is within [`UP_DEGENERACY_THRESHOLD`] of colinear
/// with it. On degeneracy against world up the substitute is `(0, 0, -s)`,
/// `s` the sign of the alignment; on degeneracy against a substitute the
/// camera returns to world up. A substitute stays in place while world up is
/// still degenerate for the current eye.
pub fn next_up(eye_dir: Vec3, current: Vec3) -> Vec3 {
  let alignment = eye_dir.dot(current);

  if alignment.abs() > UP_DEGENERACY_THRESHOLD {
    if current == WORLD_UP {
      let s = if alignment < 0.0 { -1.0 } else { 1.0 };
      Vec3::new(0.0, 0.0, -s)
    } else {
      WORLD_UP
    }
  } else if eye_dir.dot(WORLD_UP).abs() > UP_DEGENERACY_THRESHOLD {
    current
  } else {
    WORLD_UP
  }
}

/// `distance` if usable, otherwise `fallback` with a warning.
pub fn clamp_camera_distance(distance: f32, fallback: f32) -> f32 {
  if distance >= MIN_CAMERA_DISTANCE {
    distance
  } else {
    tracing::warn!(
      "camera distance {} is below the minimum {}, using {}",
      distance,
      MIN_CAMERA_DISTANCE,
      fallback
    );
    fallback
  }
}
