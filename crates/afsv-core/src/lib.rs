//! Timeline and event model for recorded flight sessions.
//!
//! This crate contains the fundamental types and logic for:
//! - Session catalog: finding saved sessions and grouping them by month, day and time
//! - Event streams: the ordered event log of one opened session
//! - Interval reconstruction: recording spans and point markers from start/stop events
//! - Time axis: mapping session time to pixels, snapping and ruler ticks
//! - Timeline view: render-ready frames for a presentation layer

pub mod axis;
pub mod catalog;
pub mod event;
pub mod event_type;
pub mod interval;
pub mod reader;
pub mod stream;
pub mod timeline;
pub mod types;

pub use axis::{AxisError, Tick, Ticks, TimeAxis};
pub use catalog::{CatalogError, SessionCatalog, days_in_month, months_present, times_on_day};
pub use event::RecordedEvent;
pub use event_type::{EventKind, IntervalKind};
pub use interval::{
    IconKind, Interval, Marker, Reconstruction, derive_intervals, derive_markers, reconstruct,
};
pub use reader::{JsonSessionReader, ReadError, SessionReader, SessionRecording};
pub use stream::EventStream;
pub use timeline::{
    Band, MarkerGlyph, PointerButton, PointerReadout, TimelineConfig, TimelineFrame, TimelineView,
};
pub use types::{MonthBucket, SessionIdentifier, SessionNameError, SessionSelection, TimeOfDay};
