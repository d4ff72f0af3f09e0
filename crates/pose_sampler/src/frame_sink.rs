//! FrameSink - the renderer/writer seam between a sequencer and the outside.
//!
//! [`run_to_completion`] is the render loop: it pulls
//! [`ViewSequencer::step`] and hands every captured pose to the sink until the
//! sequencer reports its final preview frame.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::RunError;
use crate::sequencer::ViewSequencer;
use crate::types::{FrameStep, ViewPose};

/// Receiver of sequencer output.
///
/// # Example
///
/// ```ignore
/// struct OffscreenRenderer { /* ... */ }
///
/// impl FrameSink for OffscreenRenderer {
///     fn capture(&mut self, image_index: u32, pose: &ViewPose) -> io::Result<()> {
///         self.draw(pose.view);
///         self.save_png(format!("{:05}.png", image_index))
///     }
///
///     fn preview(&mut self, pose: &ViewPose) -> io::Result<()> {
///         self.draw(pose.view);
///         Ok(())
///     }
/// }
/// ```
pub trait FrameSink {
  /// Render `pose` and save the frame as image `image_index`.
  fn capture(&mut self, image_index: u32, pose: &ViewPose) -> io::Result<()>;

  /// Render `pose` for display only. Called once, after the last capture.
  fn preview(&mut self, pose: &ViewPose) -> io::Result<()>;
}

/// No-op sink for headless runs and tests.
pub struct NullSink;

impl FrameSink for NullSink {
  fn capture(&mut self, _image_index: u32, _pose: &ViewPose) -> io::Result<()> {
    Ok(())
  }

  fn preview(&mut self, _pose: &ViewPose) -> io::Result<()> {
    Ok(())
  }
}

/// Frames handled by one [`run_to_completion`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
  /// Frames passed to [`FrameSink::capture`].
  pub captured: usize,
  /// Steps with nothing to render (the tree root).
  pub skipped: usize,
}

/// Step `sequencer` until its first preview frame, feeding `sink`.
///
/// A sequencer that is already done yields a single preview and an empty
/// summary.
pub fn run_to_completion<S, K>(sequencer: &mut S, sink: &mut K) -> Result<RunSummary, RunError>
where
  S: ViewSequencer + ?Sized,
  K: FrameSink + ?Sized,
{
  let mut summary = RunSummary::default();

  loop {
    match sequencer.step()? {
      FrameStep::Capture { pose, image_index } => {
        sink
          .capture(image_index, &pose)
          .map_err(|source| RunError::Sink {
            image_index: Some(image_index),
            source,
          })?;
        summary.captured += 1;
      }
      FrameStep::Skip => summary.skipped += 1,
      FrameStep::Preview { pose } => {
        sink.preview(&pose).map_err(|source| RunError::Sink {
          image_index: None,
          source,
        })?;
        break;
      }
    }
  }

  tracing::info!(
    captured = summary.captured,
    skipped = summary.skipped,
    "sequence complete"
  );
  Ok(summary)
}

/// Writes one line per captured frame: the image index, then the 16 view
/// matrix entries in column-major order, tab separated.
pub struct PoseLogSink<W: Write> {
  out: W,
  records: usize,
}

impl PoseLogSink<BufWriter<File>> {
  /// Log into a new file at `path`, creating parent directories.
  pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    Ok(Self::new(BufWriter::new(File::create(path)?)))
  }
}

impl<W: Write> PoseLogSink<W> {
  pub fn new(out: W) -> Self {
    Self { out, records: 0 }
  }

  /// Lines written so far.
  pub fn records(&self) -> usize {
    self.records
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> FrameSink for PoseLogSink<W> {
  fn capture(&mut self, image_index: u32, pose: &ViewPose) -> io::Result<()> {
    write!(self.out, "{}", image_index)?;
    for value in pose.view.to_cols_array() {
      write!(self.out, "\t{}", value)?;
    }
    writeln!(self.out)?;
    self.records += 1;
    Ok(())
  }

  /// Nothing is saved for the preview; pending records are flushed.
  fn preview(&mut self, _pose: &ViewPose) -> io::Result<()> {
    self.out.flush()
  }
}

#[cfg(test)]
#[path = "frame_sink_test.rs"]
mod frame_sink_test;
