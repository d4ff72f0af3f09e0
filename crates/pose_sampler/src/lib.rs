//! pose_sampler - camera viewpoint sampling for synthetic image datasets
//!
//! Generates the camera poses an offscreen renderer needs to capture an
//! object from many directions, and organizes icosphere viewpoints into a
//! balanced pose tree for coarse-to-fine lookup.
//!
//! # Features
//!
//! - **Geodesic sampling**: icosphere vertices with edge-midpoint
//!   deduplication, plus a lat/long sphere grid
//! - **Balanced pose tree**: arena tree over subdivision levels, each node
//!   linked to its nearest viewpoints on the next level
//! - **Tree files**: tab-separated `BPTDATA` persistence
//! - **View sequencers**: grid, tree-walk and random-pose state machines
//!   with NaN-free camera orientation at the poles
//! - **Sessions**: TOML configuration and a render-loop driver
//!
//! # Example
//!
//! ```ignore
//! use pose_sampler::{run_to_completion, PoseLogSink, SessionConfig};
//!
//! let config = SessionConfig::from_toml_str(r#"mode = "tree""#)?;
//! let mut sequencer = config.build_sequencer();
//! let mut sink = PoseLogSink::create("out/poses.txt")?;
//!
//! let summary = run_to_completion(&mut sequencer, &mut sink)?;
//! println!("captured {} images", summary.captured);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{ConfigError, RunError, SequenceError, StoreError};
pub use types::{FrameStep, SamplePoint, SampleSet, ViewPose};

// Sample generators
pub mod geodesic;
pub mod sphere_grid;

// Pose tree and its file format
pub mod pose_tree;
pub use pose_tree::{NodeId, PoseNode, PoseTree};

// Sequencers
pub mod sequencer;
pub use sequencer::{
  GridSequencer, PoseLimits, RandomPoseConfig, RandomPoseSequencer, TreeWalkConfig,
  TreeWalkSequencer, ViewSequencer,
};

// Render loop seam
pub mod frame_sink;
pub use frame_sink::{run_to_completion, FrameSink, NullSink, PoseLogSink, RunSummary};

// Session configuration
pub mod config;
pub use config::{CameraMode, SessionConfig};
