//! Error types for tree persistence, configuration loading, sequencing and
//! frame output.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing a pose tree file.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("pose tree file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("no DATA section in {}", .0.display())]
  MissingDataSection(PathBuf),

  #[error("line {line}: {reason}")]
  Parse { line: usize, reason: String },

  #[error("line {line}: link references unknown node {node_id}")]
  UnknownNode { line: usize, node_id: usize },

  #[error("line {line}: node {node_id} defined twice")]
  DuplicateNode { line: usize, node_id: usize },

  #[error("node {0} is linked but never defined")]
  MissingNode(usize),

  #[error("tree has no root node (id 0)")]
  MissingRoot,

  #[error("node {child} is not one level below its parent {parent}")]
  LevelMismatch { parent: usize, child: usize },

  #[error("node {child} is linked to more than one parent")]
  MultipleParents { child: usize },

  #[error("node {0} is not reachable from the root")]
  Orphan(usize),
}

impl StoreError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    StoreError::Io {
      path: path.into(),
      source,
    }
  }
}

/// Failures loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config TOML: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("invalid config: {0}")]
  Invalid(String),
}

/// Failures surfaced by a sequencer step.
#[derive(Debug, Error)]
pub enum SequenceError {
  #[error("failed to write pose tree: {0}")]
  TreeWrite(#[from] StoreError),
}

/// Failures while driving a sequencer into a frame sink.
#[derive(Debug, Error)]
pub enum RunError {
  #[error(transparent)]
  Sequence(#[from] SequenceError),

  #[error("frame sink failed at image {image_index:?}: {source}")]
  Sink {
    image_index: Option<u32>,
    #[source]
    source: std::io::Error,
  },
}
