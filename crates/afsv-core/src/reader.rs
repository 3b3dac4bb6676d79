//! The seam between the timeline core and whatever parses session files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::RecordedEvent;

/// Buffer size for `BufReader` (64KB, recordings are small).
const BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a reader extracts from one session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    /// Events in file order.
    pub events: Vec<RecordedEvent>,
    /// Time spent airborne, as accounted by the reader.
    #[serde(default)]
    pub flight_time_seconds: f64,
    /// Pictures taken, as accounted by the reader.
    #[serde(default)]
    pub picture_count: u32,
    #[serde(default)]
    pub picture_paths: Vec<PathBuf>,
}

/// Parses a session file into a [`SessionRecording`].
///
/// Implementations report failure and nothing else: callers log it and do
/// not retry.
pub trait SessionReader {
    fn read_session(&self, path: &Path) -> Result<SessionRecording, ReadError>;
}

/// Reads recordings exported as a single JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSessionReader;

impl SessionReader for JsonSessionReader {
    fn read_session(&self, path: &Path) -> Result<SessionRecording, ReadError> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let recording: SessionRecording = serde_json::from_reader(reader)?;
        tracing::debug!(
            path = ?path,
            events = recording.events.len(),
            "read session recording"
        );
        Ok(recording)
    }
}
