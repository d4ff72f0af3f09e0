//! Grid sequencers: one captured frame per sample of a fixed point set.

use super::{clamp_camera_distance, SequencerState, ViewSequencer};
use crate::constants::DEFAULT_CAMERA_DISTANCE;
use crate::error::SequenceError;
use crate::types::{FrameStep, SampleSet};
use crate::{geodesic, sphere_grid};

/// Walks a sample set in index order, one capture per point.
///
/// The preview re-shows the first sample.
#[derive(Clone, Debug)]
pub struct GridSequencer {
  samples: SampleSet,
  camera_distance: f32,
  state: SequencerState,
}

impl GridSequencer {
  /// Lat/long grid (`segments` azimuth steps per half turn, `rows` elevation
  /// rows).
  pub fn on_sphere(camera_distance: f32, segments: u32, rows: u32) -> Self {
    Self::from_samples(sphere_grid::create(segments, rows), camera_distance)
  }

  /// Icosphere vertices at subdivision `level`.
  pub fn on_polyhedron(camera_distance: f32, level: u32) -> Self {
    Self::from_samples(geodesic::create(level), camera_distance)
  }

  /// Any sample set. Empty sets start done.
  pub fn from_samples(samples: SampleSet, camera_distance: f32) -> Self {
    let camera_distance = clamp_camera_distance(camera_distance, DEFAULT_CAMERA_DISTANCE);
    tracing::info!("grid sequencer over {} viewpoints", samples.len());
    Self {
      state: SequencerState::new(samples.len()),
      samples,
      camera_distance,
    }
  }

  pub fn samples(&self) -> &SampleSet {
    &self.samples
  }

  pub fn camera_distance(&self) -> f32 {
    self.camera_distance
  }
}

impl ViewSequencer for GridSequencer {
  fn step(&mut self) -> Result<FrameStep, SequenceError> {
    let Some(index) = self.state.advance() else {
      let first = self.samples.points.first().map(|p| p.normal);
      let pose = self.state.preview(first, self.camera_distance);
      return Ok(FrameStep::Preview { pose });
    };

    let pose = self
      .state
      .orient(self.samples.points[index].normal, self.camera_distance);
    tracing::debug!("render image {} from pos: {:?}", index, pose.eye);

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
#[path = "grid_test.rs"]
mod grid_test;
