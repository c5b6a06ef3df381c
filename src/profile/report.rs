//! Frame statistics reports
//!
//! A [`ProfileSnapshot`] is the read-only result of a profiling session. It
//! can be rendered as a one-line summary or written to disk as RON or JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Aggregate of the frame timings collected over a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Frames recorded
    pub sample_count: u64,
    /// Mean frame time
    pub mean_frame_time: f64,
    /// Shortest frame time
    pub min_frame_time: f64,
    /// Longest frame time
    pub max_frame_time: f64,
    /// Frames per second at the mean frame time
    pub mean_fps: f64,
    /// Lowest per-frame FPS
    pub min_fps: f64,
    /// Highest per-frame FPS
    pub max_fps: f64,
    /// Per-frame FPS in recording order
    pub fps_samples: Vec<f64>,
    /// Session length in milliseconds
    pub session_ms: f64,
    /// Whether the session was closed
    pub finished: bool,
}

impl ProfileSnapshot {
    /// One-line human readable summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} frames in {:.0}ms | FPS: {:.1} (min: {:.1}, max: {:.1}) | Frame: {:.2} (min: {:.2}, max: {:.2})",
            self.sample_count,
            self.session_ms,
            self.mean_fps,
            self.min_fps,
            self.max_fps,
            self.mean_frame_time,
            self.min_frame_time,
            self.max_frame_time
        )
    }

    /// Serialize to pretty RON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_ron(&self) -> Result<String, ReportError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ReportError::SerializeError(e.to_string()))
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|e| ReportError::SerializeError(e.to_string()))
    }

    /// Write the report. `.ron` files get RON, anything else JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let is_ron = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
        let text = if is_ron { self.to_ron()? } else { self.to_json()? };

        fs::write(path, text).map_err(|e| ReportError::IoError(e.to_string()))?;
        log::info!("Saved profile report to {}", path.display());
        Ok(())
    }
}

/// Errors that can occur while writing a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The profiling session has not ended yet
    SessionOpen,
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionOpen => write!(f, "Profiling session is still open"),
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}
