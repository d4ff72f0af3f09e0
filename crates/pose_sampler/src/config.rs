//! SessionConfig - TOML description of one capture session.
//!
//! ```toml
//! mode = "tree"              # sphere | polyhedron | tree | pose
//! camera_distance = 1.3      # optional, per-mode default otherwise
//!
//! [tree]
//! max_level = 2
//! output_dir = "out/tree"
//!
//! [pose]
//! num_images = 5000
//! seed = 42
//! limits_min = [-2.0, -2.0, -3.0]
//! limits_max = [2.0, 2.0, -1.0]
//! ```
//!
//! Only the section of the selected mode is used; every section and field is
//! optional.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use crate::constants::{
  DEFAULT_CAMERA_DISTANCE, DEFAULT_RANDOM_CAMERA_DISTANCE, DEFAULT_SPHERE_ROWS,
  DEFAULT_SPHERE_SEGMENTS,
};
use crate::error::ConfigError;
use crate::sequencer::{
  GridSequencer, PoseLimits, RandomPoseConfig, RandomPoseSequencer, TreeWalkConfig,
  TreeWalkSequencer, ViewSequencer,
};

/// Which sequencer a session runs.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
  /// Lat/long grid on a sphere.
  Sphere,
  /// Icosphere vertices.
  Polyhedron,
  /// Balanced pose tree walk.
  Tree,
  /// Random orientation and object offset.
  Pose,
}

/// Root session configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SessionConfig {
  pub mode: CameraMode,

  /// Camera distance from the scene center. Defaults to 1.2 for `pose`,
  /// 1.3 otherwise.
  #[serde(default)]
  pub camera_distance: Option<f32>,

  #[serde(default)]
  pub sphere: SphereSection,

  #[serde(default)]
  pub polyhedron: PolyhedronSection,

  #[serde(default)]
  pub tree: TreeSection,

  #[serde(default)]
  pub pose: PoseSection,
}

/// `[sphere]`
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereSection {
  pub segments: u32,
  pub rows: u32,
}

impl Default for SphereSection {
  fn default() -> Self {
    Self {
      segments: DEFAULT_SPHERE_SEGMENTS,
      rows: DEFAULT_SPHERE_ROWS,
    }
  }
}

/// `[polyhedron]`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolyhedronSection {
  /// Subdivision level; 0 is the icosahedron.
  pub level: u32,
}

/// `[tree]`
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeSection {
  pub max_level: i32,
  /// Directory receiving `BPTData.csv`.
  pub output_dir: PathBuf,
}

impl Default for TreeSection {
  fn default() -> Self {
    let walk = TreeWalkConfig::default();
    Self {
      max_level: walk.max_level,
      output_dir: walk.output_dir,
    }
  }
}

/// `[pose]`
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoseSection {
  pub num_images: u32,
  pub level: u32,
  pub upper_hemisphere: bool,
  pub seed: Option<u64>,
  /// Lower offset bounds `[x, y, z]` in camera coordinates.
  pub limits_min: [f32; 3],
  /// Upper offset bounds `[x, y, z]` in camera coordinates.
  pub limits_max: [f32; 3],
}

impl Default for PoseSection {
  fn default() -> Self {
    let random = RandomPoseConfig::default();
    Self {
      num_images: random.num_images,
      level: random.level,
      upper_hemisphere: random.upper_hemisphere,
      seed: random.seed,
      limits_min: random.limits.min.to_array(),
      limits_max: random.limits.max.to_array(),
    }
  }
}

impl SessionConfig {
  /// Load configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_toml_str(&content)?;
    tracing::info!("loaded {:?} session from {}", config.mode, path.display());
    Ok(config)
  }

  /// Parse and validate TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: SessionConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reject values no clamp can repair. Out-of-range but finite values are
  /// left to the sequencers, which warn and substitute defaults.
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(distance) = self.camera_distance {
      if !distance.is_finite() {
        return Err(ConfigError::Invalid(format!(
          "camera_distance must be finite, got {}",
          distance
        )));
      }
    }

    let mut limits = self.pose.limits_min.iter().chain(&self.pose.limits_max);
    if limits.any(|v| !v.is_finite()) {
      return Err(ConfigError::Invalid(format!(
        "pose limits must be finite, got {:?} / {:?}",
        self.pose.limits_min, self.pose.limits_max
      )));
    }

    Ok(())
  }

  /// Effective camera distance for the selected mode.
  pub fn camera_distance(&self) -> f32 {
    self.camera_distance.unwrap_or(match self.mode {
      CameraMode::Pose => DEFAULT_RANDOM_CAMERA_DISTANCE,
      _ => DEFAULT_CAMERA_DISTANCE,
    })
  }

  pub fn tree_walk_config(&self) -> TreeWalkConfig {
    TreeWalkConfig {
      camera_distance: self.camera_distance(),
      max_level: self.tree.max_level,
      output_dir: self.tree.output_dir.clone(),
    }
  }

  pub fn random_pose_config(&self) -> RandomPoseConfig {
    RandomPoseConfig {
      camera_distance: self.camera_distance(),
      num_images: self.pose.num_images,
      level: self.pose.level,
      upper_hemisphere: self.pose.upper_hemisphere,
      limits: PoseLimits::new(
        Vec3::from_array(self.pose.limits_min),
        Vec3::from_array(self.pose.limits_max),
      ),
      seed: self.pose.seed,
    }
  }

  /// Construct the sequencer this session describes.
  pub fn build_sequencer(&self) -> Box<dyn ViewSequencer> {
    let distance = self.camera_distance();
    match self.mode {
      CameraMode::Sphere => Box::new(GridSequencer::on_sphere(
        distance,
        self.sphere.segments,
        self.sphere.rows,
      )),
      CameraMode::Polyhedron => Box::new(GridSequencer::on_polyhedron(
        distance,
        self.polyhedron.level,
      )),
      CameraMode::Tree => Box::new(TreeWalkSequencer::new(self.tree_walk_config())),
      CameraMode::Pose => Box::new(RandomPoseSequencer::new(self.random_pose_config())),
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
