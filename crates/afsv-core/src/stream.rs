//! Event streams - the immutable event log of one opened session.

use std::path::PathBuf;

use crate::event::RecordedEvent;
use crate::reader::SessionRecording;

/// The events of one session plus the reader's aggregate accounting.
///
/// Frozen once constructed; derived data (intervals, markers) is recomputed
/// from it rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream {
    events: Vec<RecordedEvent>,
    flight_time_seconds: f64,
    picture_count: u32,
    picture_paths: Vec<PathBuf>,
}

impl EventStream {
    pub fn from_recording(recording: SessionRecording) -> Self {
        Self {
            events: recording.events,
            flight_time_seconds: recording.flight_time_seconds,
            picture_count: recording.picture_count,
            picture_paths: recording.picture_paths,
        }
    }

    /// Events in file order.
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Session length: the offset of the last event, in seconds.
    ///
    /// The stream must not be empty. Callers check [`Self::is_empty`] before
    /// building a timeline; an empty stream reports `0.0`, which no
    /// [`TimeAxis`](crate::axis::TimeAxis) accepts.
    pub fn duration_seconds(&self) -> f64 {
        debug_assert!(!self.events.is_empty(), "duration of an empty session");
        self.events
            .last()
            .map_or(0.0, RecordedEvent::offset_seconds)
    }

    pub const fn flight_time_seconds(&self) -> f64 {
        self.flight_time_seconds
    }

    pub const fn picture_count(&self) -> u32 {
        self.picture_count
    }

    pub fn picture_paths(&self) -> &[PathBuf] {
        &self.picture_paths
    }

    /// One-line summary shown under the session heading.
    pub fn summary_line(&self) -> String {
        format!(
            "Session duration: {:.1} | Total flight time: {:.1} | Pictures taken: {}",
            self.duration_seconds(),
            self.flight_time_seconds,
            self.picture_count
        )
    }
}

impl From<SessionRecording> for EventStream {
    fn from(recording: SessionRecording) -> Self {
        Self::from_recording(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(offsets: &[u64]) -> EventStream {
        EventStream::from_recording(SessionRecording {
            events: offsets
                .iter()
                .map(|&ms| RecordedEvent::new("PictureTaken", "", ms))
                .collect(),
            flight_time_seconds: 42.3,
            picture_count: 7,
            picture_paths: vec![PathBuf::from("/pics/1.jpg")],
        })
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for representable values"
    )]
    fn duration_is_last_offset() {
        let s = stream(&[0, 1000, 12_500]);
        assert_eq!(s.duration_seconds(), 12.5);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for representable values"
    )]
    fn duration_uses_last_event_not_maximum() {
        // Offsets are not re-sorted.
        let s = stream(&[0, 9000, 3000]);
        assert_eq!(s.duration_seconds(), 3.0);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for representable values"
    )]
    fn aggregates_come_from_reader() {
        let s = stream(&[0, 1000]);
        assert_eq!(s.picture_count(), 7);
        assert_eq!(s.flight_time_seconds(), 42.3);
        assert_eq!(s.picture_paths().len(), 1);
        assert_eq!(s.events().len(), 2);
    }

    #[test]
    fn summary_line_format() {
        let s = stream(&[0, 65_430]);
        assert_eq!(
            s.summary_line(),
            "Session duration: 65.4 | Total flight time: 42.3 | Pictures taken: 7"
        );
    }
}
