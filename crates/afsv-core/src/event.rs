//! Timestamped events recorded during a flight session.

use serde::{Deserialize, Serialize};

use crate::event_type::EventKind;

/// One event from a session recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// What happened.
    pub kind: EventKind,
    /// Free-form detail, e.g. the picture path for `PictureTaken`.
    #[serde(default)]
    pub payload: String,
    /// Milliseconds elapsed since the session started.
    pub offset_ms: u64,
}

impl RecordedEvent {
    pub fn new(kind: impl Into<EventKind>, payload: impl Into<String>, offset_ms: u64) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
            offset_ms,
        }
    }

    /// Offset in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_seconds(&self) -> f64 {
        self.offset_ms as f64 / 1000.0
    }
}
