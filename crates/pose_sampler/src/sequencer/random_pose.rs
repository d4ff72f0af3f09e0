//! Random pose sequencer: random viewpoint plus random object offset per
//! frame, for training images with varied object placement.
//!
//! Orientations are drawn with replacement from an icosphere, so a long run
//! repeats viewpoints. The offset is sampled in camera coordinates (camera
//! looks down -Z, x to the right, y up) and applied after the view
//! transform; the reported eye is the camera position of the combined view.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{clamp_camera_distance, SequencerState, ViewSequencer};
use crate::constants::{
  DEFAULT_RANDOM_CAMERA_DISTANCE, LARGE_RUN_WARNING, MAX_FAR_DEPTH, MAX_NEAR_DEPTH,
};
use crate::error::SequenceError;
use crate::geodesic;
use crate::types::{FrameStep, SampleSet, ViewPose};

/// Per-axis bounds of the random object offset, in camera coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseLimits {
  pub min: Vec3,
  pub max: Vec3,
}

impl Default for PoseLimits {
  fn default() -> Self {
    Self {
      min: Vec3::new(-2.0, -2.0, -3.0),
      max: Vec3::new(2.0, 2.0, -1.0),
    }
  }
}

impl PoseLimits {
  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Replace non-finite axes with the defaults, swap reversed axes, then keep
  /// the depth range away from the camera: `max.z <= -0.5`, `min.z <= -1.0`.
  /// The result is finite and always has `min <= max`.
  pub fn normalized(self) -> Self {
    let fallback = Self::default();
    let mut min = self.min;
    let mut max = self.max;

    for (axis, name) in ["x", "y", "z"].iter().enumerate() {
      if !min[axis].is_finite() || !max[axis].is_finite() {
        tracing::warn!(
          "{} limits [{}, {}] are not finite, using [{}, {}]",
          name,
          min[axis],
          max[axis],
          fallback.min[axis],
          fallback.max[axis]
        );
        min[axis] = fallback.min[axis];
        max[axis] = fallback.max[axis];
      }
      if max[axis] < min[axis] {
        tracing::warn!(
          "{} upper limit {} < lower limit {}, flipped values",
          name,
          max[axis],
          min[axis]
        );
        std::mem::swap(&mut min[axis], &mut max[axis]);
      }
    }

    max.z = max.z.min(MAX_NEAR_DEPTH);
    min.z = min.z.min(MAX_FAR_DEPTH);
    Self { min, max }
  }

  /// Uniform sample inside the limits. Call on normalized limits.
  fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
    Vec3::new(
      rng.random_range(self.min.x..=self.max.x),
      rng.random_range(self.min.y..=self.max.y),
      rng.random_range(self.min.z..=self.max.z),
    )
  }
}

/// Random pose sequencer configuration.
#[derive(Clone, Debug)]
pub struct RandomPoseConfig {
  /// Camera distance from the scene center.
  pub camera_distance: f32,

  /// Number of frames to capture.
  pub num_images: u32,

  /// Icosphere subdivision level supplying orientations.
  pub level: u32,

  /// Drop orientations below the horizon (negative y).
  pub upper_hemisphere: bool,

  /// Object offset bounds.
  pub limits: PoseLimits,

  /// Fixed seed for reproducible runs; `None` seeds from the OS.
  pub seed: Option<u64>,
}

impl Default for RandomPoseConfig {
  fn default() -> Self {
    Self {
      camera_distance: DEFAULT_RANDOM_CAMERA_DISTANCE,
      num_images: 1000,
      level: 0,
      upper_hemisphere: true,
      limits: PoseLimits::default(),
      seed: None,
    }
  }
}

/// Captures `num_images` frames, each from a random orientation with the
/// object shifted by a random offset inside [`PoseLimits`].
///
/// The preview re-shows the first orientation without an offset.
#[derive(Debug)]
pub struct RandomPoseSequencer {
  samples: SampleSet,
  camera_distance: f32,
  limits: PoseLimits,
  rng: StdRng,
  state: SequencerState,
}

impl RandomPoseSequencer {
  pub fn new(config: RandomPoseConfig) -> Self {
    Self::from_samples(geodesic::create(config.level), config)
  }

  /// Draw orientations from `samples` instead of an icosphere.
  /// `config.level` is ignored.
  pub fn from_samples(mut samples: SampleSet, config: RandomPoseConfig) -> Self {
    if config.upper_hemisphere {
      samples.retain_upper_hemisphere();
    }
    if config.num_images > LARGE_RUN_WARNING {
      tracing::warn!(
        "note that rendering {} images will take a while",
        config.num_images
      );
    }

    let total = if samples.is_empty() {
      0
    } else {
      config.num_images as usize
    };
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };

    tracing::info!(
      "random pose sequencer: {} images over {} orientations",
      total,
      samples.len()
    );

    Self {
      samples,
      camera_distance: clamp_camera_distance(
        config.camera_distance,
        DEFAULT_RANDOM_CAMERA_DISTANCE,
      ),
      limits: config.limits.normalized(),
      rng,
      state: SequencerState::new(total),
    }
  }

  /// Candidate orientations after the hemisphere filter.
  pub fn samples(&self) -> &SampleSet {
    &self.samples
  }

  /// Effective (normalized) offset limits.
  pub fn limits(&self) -> PoseLimits {
    self.limits
  }

  pub fn camera_distance(&self) -> f32 {
    self.camera_distance
  }
}

impl ViewSequencer for RandomPoseSequencer {
  fn step(&mut self) -> Result<FrameStep, SequenceError> {
    let Some(index) = self.state.advance() else {
      let first = self.samples.points.first().map(|p| p.normal);
      let pose = self.state.preview(first, self.camera_distance);
      return Ok(FrameStep::Preview { pose });
    };

    let pick = self.rng.random_range(0..self.samples.len());
    let look = self
      .state
      .orient(self.samples.points[pick].normal, self.camera_distance);

    let offset = self.limits.sample(&mut self.rng);
    let translation = Mat4::from_translation(Vec3::new(
      offset.x,
      offset.y,
      offset.z + self.camera_distance,
    ));
    let view = translation * look.view;
    let pose = ViewPose {
      view,
      eye: view.inverse().transform_point3(Vec3::ZERO),
      up: look.up,
    };

    tracing::debug!(
      "render image {} from pos: {:?}, with translation {:?}",
      index,
      pose.eye,
      offset
    );
    if self.state.is_done() {
      tracing::info!("DONE - rendered {} images", self.state.total());
    }

    Ok(FrameStep::Capture {
      pose,
      image_index: index as u32,
    })
  }

  fn total_count(&self) -> usize {
    self.state.total()
  }

  fn is_done(&self) -> bool {
    self.state.is_done()
  }
}

#[cfg(test)]
#[path = "random_pose_test.rs"]
mod random_pose_test;
