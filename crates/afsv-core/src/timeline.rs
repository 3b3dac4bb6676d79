//! Render-ready timeline frames and pointer interaction.
//!
//! [`TimelineView`] is the boundary a presentation layer talks to. It is fed
//! the display width and pointer activity, and hands back everything needed
//! to draw one frame: marker glyphs, recording bands, ruler ticks, the
//! pointer readout and the playhead. It never draws anything itself.

use serde::Serialize;

use crate::axis::{AxisError, Tick, TimeAxis};
use crate::event_type::IntervalKind;
use crate::interval::{IconKind, Marker, reconstruct};
use crate::stream::EventStream;

/// Tunables for timeline interaction and the ruler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// How close (in pixels) the pointer must be to a marker to snap onto it.
    /// Default: 10.
    pub snap_tolerance_px: f64,
    /// Default: 5.
    pub seconds_per_major_tick: f64,
    /// Default: 5.
    pub minor_ticks_per_major: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            snap_tolerance_px: 10.0,
            seconds_per_major_tick: 5.0,
            minor_ticks_per_major: 5,
        }
    }
}

/// Mouse button state reported with pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Released,
    Primary,
}

/// A marker icon placed at a pixel position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGlyph {
    pub icon: IconKind,
    pub x: f64,
    pub payload: String,
}

/// A recording span placed between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub kind: IntervalKind,
    pub start_x: f64,
    pub end_x: f64,
}

/// Where the pointer is and what time it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerReadout {
    pub x: f64,
    pub time_seconds: f64,
    /// Text drawn next to the pointer line, e.g. `t = 12.5`.
    pub label: String,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub width: u32,
    pub duration_seconds: f64,
    pub markers: Vec<MarkerGlyph>,
    pub bands: Vec<Band>,
    pub ticks: Vec<Tick>,
    pub pointer: Option<PointerReadout>,
    pub playhead_x: f64,
    pub playhead_seconds: f64,
    /// Recordings running at the playhead.
    pub active_recordings: Vec<IntervalKind>,
}

/// Interactive timeline over one session.
#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    stream: &'a EventStream,
    axis: TimeAxis,
    config: TimelineConfig,
    pointer_x: Option<f64>,
    playhead_seconds: f64,
}

impl<'a> TimelineView<'a> {
    /// Builds a view over a non-empty stream.
    pub fn new(
        stream: &'a EventStream,
        pixel_width: u32,
        config: TimelineConfig,
    ) -> Result<Self, AxisError> {
        if stream.is_empty() {
            return Err(AxisError::InvalidConfiguration(
                "cannot build a timeline for an empty session".to_string(),
            ));
        }
        if !config.snap_tolerance_px.is_finite() || config.snap_tolerance_px < 0.0 {
            return Err(AxisError::InvalidConfiguration(format!(
                "snap tolerance must be a non-negative number of pixels, got {}",
                config.snap_tolerance_px
            )));
        }
        let axis = TimeAxis::new(stream.duration_seconds(), pixel_width)?;
        // Validate ruler settings once so frames never fail.
        axis.ticks(config.seconds_per_major_tick, config.minor_ticks_per_major)?;

        Ok(Self {
            stream,
            axis,
            config,
            pointer_x: None,
            playhead_seconds: 0.0,
        })
    }

    pub const fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub const fn playhead_seconds(&self) -> f64 {
        self.playhead_seconds
    }

    /// Snapped pointer position, if the pointer is over the timeline.
    pub const fn pointer_x(&self) -> Option<f64> {
        self.pointer_x
    }

    /// Rebuilds the axis for a new display width.
    pub fn resize(&mut self, pixel_width: u32) -> Result<(), AxisError> {
        let axis = TimeAxis::new(self.axis.total_duration_seconds(), pixel_width)?;
        if let Some(x) = self.pointer_x {
            self.pointer_x = Some(axis.to_pixel(self.axis.to_time(x)));
        }
        self.axis = axis;
        Ok(())
    }

    /// Pointer moved. While the primary button is held the playhead follows
    /// the raw pointer; the displayed pointer always snaps. Non-finite
    /// positions are ignored.
    pub fn pointer_moved(&mut self, x: f64, button: PointerButton) {
        if !x.is_finite() {
            tracing::trace!(x, "non-finite pointer position ignored");
            return;
        }
        self.pointer_x = Some(self.snapped(x));
        if button == PointerButton::Primary {
            self.playhead_seconds = self.axis.to_time(x);
        }
    }

    /// Pointer released: the playhead lands on the snapped position.
    pub fn pointer_released(&mut self, x: f64) {
        if !x.is_finite() {
            tracing::trace!(x, "non-finite pointer position ignored");
            return;
        }
        let snapped = self.snapped(x);
        self.pointer_x = Some(snapped);
        self.playhead_seconds = self.axis.to_time(snapped);
    }

    pub fn pointer_left(&mut self) {
        self.pointer_x = None;
    }

    /// Moves the playhead directly, clamped to the session. NaN is ignored.
    pub fn seek(&mut self, time_seconds: f64) {
        if time_seconds.is_nan() {
            return;
        }
        self.playhead_seconds = time_seconds.clamp(0.0, self.axis.total_duration_seconds());
    }

    /// The marker the pointer currently sits on, if any.
    pub fn marker_under_pointer(&self) -> Option<Marker> {
        let x = self.pointer_x?;
        let markers = reconstruct(self.stream.events()).markers;
        self.axis
            .nearest_marker(x, &markers, self.config.snap_tolerance_px)
            .map(|(marker, _)| marker.clone())
    }

    fn snapped(&self, x: f64) -> f64 {
        let markers = reconstruct(self.stream.events()).markers;
        self.axis.snap(x, &markers, self.config.snap_tolerance_px)
    }

    /// Computes a frame. Markers and bands are derived afresh on each call.
    pub fn frame(&self) -> TimelineFrame {
        let derived = reconstruct(self.stream.events());
        let axis = &self.axis;

        let markers = derived
            .markers
            .iter()
            .map(|m| MarkerGlyph {
                icon: m.icon,
                x: axis.to_pixel(m.offset_seconds()),
                payload: m.payload.clone(),
            })
            .collect();

        let bands = derived
            .intervals
            .iter()
            .map(|i| Band {
                kind: i.kind,
                start_x: axis.to_pixel(ms_to_seconds(i.start_ms)),
                end_x: axis.to_pixel(ms_to_seconds(i.end_ms)),
            })
            .collect();

        let ticks = axis
            .ticks(
                self.config.seconds_per_major_tick,
                self.config.minor_ticks_per_major,
            )
            .map(|ticks| ticks.collect::<Vec<_>>())
            .unwrap_or_default();

        let pointer = self.pointer_x.map(|x| {
            let time_seconds = axis.to_time(x);
            PointerReadout {
                x,
                time_seconds,
                label: format!("t = {time_seconds:.1}"),
            }
        });

        let mut active_recordings: Vec<IntervalKind> = derived
            .intervals_at(seconds_to_ms(self.playhead_seconds))
            .map(|i| i.kind)
            .collect();
        active_recordings.sort_by_key(|k| k.as_str());
        active_recordings.dedup();

        TimelineFrame {
            width: axis.pixel_width(),
            duration_seconds: axis.total_duration_seconds(),
            markers,
            bands,
            ticks,
            pointer,
            playhead_x: axis.to_pixel(self.playhead_seconds),
            playhead_seconds: self.playhead_seconds,
            active_recordings,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}
