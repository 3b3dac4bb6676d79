//! Interval reconstruction.
//!
//! Rebuilds recording spans and point markers from the flat event log of a
//! session in a single pass.
//!
//! # Algorithm Summary
//!
//! 1. Keep one open start offset per [`IntervalKind`]
//! 2. A start event records its offset, replacing any unclosed start
//! 3. A stop event closes the open start of its kind, or is ignored
//! 4. Everything else becomes a point marker
//!
//! Output order equals input order; nothing is re-sorted.

use serde::Serialize;

use crate::event::RecordedEvent;
use crate::event_type::{Edge, IntervalKind};
use crate::stream::EventStream;

/// A closed recording span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub kind: IntervalKind,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Interval {
    /// Whether `offset_ms` falls inside the span, both ends included.
    pub const fn contains(&self, offset_ms: u64) -> bool {
        self.start_ms <= offset_ms && offset_ms <= self.end_ms
    }
}

/// Icon drawn for a point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Picture,
    Navdata,
    Video,
    Generic,
}

impl IconKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Picture => "picture",
            Self::Navdata => "navdata",
            Self::Video => "video",
            Self::Generic => "generic",
        }
    }

    const fn for_recording(kind: IntervalKind) -> Self {
        match kind {
            IntervalKind::Navdata => Self::Navdata,
            IntervalKind::Video => Self::Video,
        }
    }
}

/// A point-in-time annotation on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub icon: IconKind,
    pub offset_ms: u64,
    /// Payload of the event the marker came from (picture path, etc).
    pub payload: String,
}

impl Marker {
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_seconds(&self) -> f64 {
        self.offset_ms as f64 / 1000.0
    }
}

/// Intervals and markers derived from one pass over a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    pub intervals: Vec<Interval>,
    pub markers: Vec<Marker>,
}

impl Reconstruction {
    /// Intervals covering `offset_ms`.
    pub fn intervals_at(&self, offset_ms: u64) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(move |i| i.contains(offset_ms))
    }

    /// Markers placed exactly at `offset_ms`.
    pub fn markers_at(&self, offset_ms: u64) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.offset_ms == offset_ms)
    }
}

/// Open start offsets, one slot per interval kind.
#[derive(Debug, Default)]
struct OpenStarts {
    navdata: Option<u64>,
    video: Option<u64>,
}

impl OpenStarts {
    fn slot(&mut self, kind: IntervalKind) -> &mut Option<u64> {
        match kind {
            IntervalKind::Navdata => &mut self.navdata,
            IntervalKind::Video => &mut self.video,
        }
    }
}

/// Reconstructs intervals and markers from events in file order.
///
/// A second start of the same kind before a stop replaces the first
/// (last start wins, the replaced start yields nothing). A stop without an
/// open start is ignored.
pub fn reconstruct(events: &[RecordedEvent]) -> Reconstruction {
    let mut open = OpenStarts::default();
    let mut out = Reconstruction::default();

    for event in events {
        let now = event.offset_ms;

        match event.kind.interval_edge() {
            Some((kind, Edge::Start)) => {
                if let Some(previous) = open.slot(kind).replace(now) {
                    tracing::debug!(%kind, previous, now, "unclosed recording start replaced");
                }
                out.markers.push(Marker {
                    icon: IconKind::for_recording(kind),
                    offset_ms: now,
                    payload: event.payload.clone(),
                });
            }
            Some((kind, Edge::Stop)) => match open.slot(kind).take() {
                Some(start_ms) => out.intervals.push(Interval {
                    kind,
                    start_ms,
                    end_ms: now,
                }),
                None => tracing::trace!(%kind, now, "recording stop without start ignored"),
            },
            None => {
                let icon = if event.kind.is_known() {
                    IconKind::Picture
                } else {
                    tracing::trace!(kind = %event.kind, now, "unknown event shown as generic marker");
                    IconKind::Generic
                };
                out.markers.push(Marker {
                    icon,
                    offset_ms: now,
                    payload: event.payload.clone(),
                });
            }
        }
    }

    out
}

/// Markers of a stream, recomputed on every call.
pub fn derive_markers(stream: &EventStream) -> Vec<Marker> {
    reconstruct(stream.events()).markers
}

/// Intervals of a stream, recomputed on every call.
pub fn derive_intervals(stream: &EventStream) -> Vec<Interval> {
    reconstruct(stream.events()).intervals
}
