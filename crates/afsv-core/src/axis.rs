//! Linear mapping between session time and display pixels.

use serde::Serialize;
use thiserror::Error;

use crate::interval::Marker;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AxisError {
    #[error("invalid timeline configuration: {0}")]
    InvalidConfiguration(String),
}

/// Maps elapsed session seconds onto `[0, pixel_width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    total_duration_seconds: f64,
    pixel_width: u32,
}

impl TimeAxis {
    /// Creates an axis. Duration must be finite and positive, width non-zero.
    pub fn new(total_duration_seconds: f64, pixel_width: u32) -> Result<Self, AxisError> {
        if !total_duration_seconds.is_finite() || total_duration_seconds <= 0.0 {
            return Err(AxisError::InvalidConfiguration(format!(
                "duration must be positive, got {total_duration_seconds}"
            )));
        }
        if pixel_width == 0 {
            return Err(AxisError::InvalidConfiguration(
                "pixel width must be positive".to_string(),
            ));
        }
        Ok(Self {
            total_duration_seconds,
            pixel_width,
        })
    }

    pub const fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub const fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    fn pixels_per_second(&self) -> f64 {
        f64::from(self.pixel_width) / self.total_duration_seconds
    }

    pub fn to_pixel(&self, time_seconds: f64) -> f64 {
        time_seconds * self.pixels_per_second()
    }

    pub fn to_time(&self, pixel_x: f64) -> f64 {
        pixel_x / self.pixels_per_second()
    }

    /// The marker closest to `pixel_x` within `tolerance_px`, with its pixel
    /// position. Ties go to the marker listed first.
    pub fn nearest_marker<'a>(
        &self,
        pixel_x: f64,
        markers: &'a [Marker],
        tolerance_px: f64,
    ) -> Option<(&'a Marker, f64)> {
        let mut best: Option<(&Marker, f64, f64)> = None;
        for marker in markers {
            let x = self.to_pixel(marker.offset_seconds());
            let distance = (x - pixel_x).abs();
            // Written as `<=` so a NaN distance or tolerance is never in reach.
            let within = distance <= tolerance_px;
            if !within {
                continue;
            }
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((marker, x, distance));
            }
        }
        best.map(|(marker, x, _)| (marker, x))
    }

    /// Snaps `pixel_x` onto the nearest marker within `tolerance_px`, or
    /// returns it unchanged.
    pub fn snap(&self, pixel_x: f64, markers: &[Marker], tolerance_px: f64) -> f64 {
        self.nearest_marker(pixel_x, markers, tolerance_px)
            .map_or(pixel_x, |(_, x)| x)
    }

    /// Ruler ticks over `[0, pixel_width)`.
    ///
    /// Each major interval of `seconds_per_major` is split into
    /// `minor_per_major` parts; the first part of each starts with a major
    /// tick. Calling this again, or cloning the iterator, replays the same
    /// sequence.
    pub fn ticks(&self, seconds_per_major: f64, minor_per_major: u32) -> Result<Ticks, AxisError> {
        if !seconds_per_major.is_finite() || seconds_per_major <= 0.0 {
            return Err(AxisError::InvalidConfiguration(format!(
                "seconds per major tick must be positive, got {seconds_per_major}"
            )));
        }
        if minor_per_major == 0 {
            return Err(AxisError::InvalidConfiguration(
                "minor ticks per major tick must be at least 1".to_string(),
            ));
        }

        let spacing = self.to_pixel(seconds_per_major) / f64::from(minor_per_major);
        if spacing <= 0.0 {
            return Err(AxisError::InvalidConfiguration(format!(
                "tick spacing underflows for {seconds_per_major}s per major tick"
            )));
        }

        Ok(Ticks {
            spacing,
            minor_per_major: u64::from(minor_per_major),
            width: f64::from(self.pixel_width),
            index: 0,
        })
    }
}

/// One ruler tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub x: f64,
    pub major: bool,
}

/// Iterator over ruler ticks; see [`TimeAxis::ticks`].
#[derive(Debug, Clone)]
pub struct Ticks {
    spacing: f64,
    minor_per_major: u64,
    width: f64,
    index: u64,
}

impl Iterator for Ticks {
    type Item = Tick;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Tick> {
        // Multiply rather than accumulate so positions do not drift.
        let x = self.index as f64 * self.spacing;
        if x >= self.width {
            return None;
        }
        let major = self.index % self.minor_per_major == 0;
        self.index += 1;
        Some(Tick { x, major })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interval::IconKind;

    fn marker(offset_ms: u64) -> Marker {
        Marker {
            icon: IconKind::Picture,
            offset_ms,
            payload: String::new(),
        }
    }

    /// One pixel per second.
    fn unit_axis() -> TimeAxis {
        TimeAxis::new(1000.0, 1000).unwrap()
    }

    #[test]
    fn rejects_non_positive_duration() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    TimeAxis::new(duration, 100),
                    Err(AxisError::InvalidConfiguration(_))
                ),
                "{duration} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_width() {
        assert!(TimeAxis::new(10.0, 0).is_err());
    }

    #[test]
    fn to_pixel_scales_linearly() {
        let axis = TimeAxis::new(20.0, 400).unwrap();
        assert!((axis.to_pixel(5.0) - 100.0).abs() < 1e-9);
        assert!((axis.to_time(300.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn pixel_time_roundtrip() {
        let axis = TimeAxis::new(37.3, 641).unwrap();
        for x in 0..641 {
            let x = f64::from(x) + 0.25;
            let back = axis.to_pixel(axis.to_time(x));
            assert!((back - x).abs() < 1e-9, "{x} came back as {back}");
        }
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "snap returns marker positions unchanged"
    )]
    fn snap_picks_marker_within_tolerance() {
        let axis = unit_axis();
        let markers = [marker(100_000), marker(300_000)];

        assert_eq!(axis.snap(105.0, &markers, 10.0), 100.0);
        assert_eq!(axis.snap(250.0, &markers, 10.0), 250.0);
        assert_eq!(axis.snap(310.0, &markers, 10.0), 300.0);
        assert_eq!(axis.snap(311.0, &markers, 10.0), 311.0);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "snap returns marker positions unchanged"
    )]
    fn snap_prefers_closest_then_first() {
        let axis = unit_axis();

        let markers = [marker(92_000), marker(103_000), marker(98_000)];
        assert_eq!(axis.snap(100.0, &markers, 10.0), 98.0);

        let tied = [marker(110_000), marker(90_000)];
        assert_eq!(axis.snap(100.0, &tied, 10.0), 110.0);
    }

    #[test]
    fn nearest_marker_reports_which_marker() {
        let axis = unit_axis();
        let mut markers = vec![marker(100_000), marker(300_000)];
        markers[1].payload = "/pics/b.jpg".to_string();

        let (found, x) = axis.nearest_marker(295.0, &markers, 10.0).unwrap();
        assert_eq!(found.payload, "/pics/b.jpg");
        assert!((x - 300.0).abs() < 1e-9);
        assert!(axis.nearest_marker(200.0, &markers, 10.0).is_none());
    }

    #[test]
    fn snap_ignores_non_finite_input() {
        let axis = unit_axis();
        let markers = [marker(100_000), marker(300_000)];

        assert!(axis.snap(f64::NAN, &markers, 10.0).is_nan());
        assert!(axis.nearest_marker(f64::NAN, &markers, 10.0).is_none());
        assert!((axis.snap(700.0, &markers, f64::NAN) - 700.0).abs() < f64::EPSILON);
        assert!(axis.nearest_marker(100.0, &markers, f64::NAN).is_none());
    }

    #[test]
    fn snap_without_markers_is_identity() {
        let axis = unit_axis();
        assert!((axis.snap(42.0, &[], 10.0) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ticks_cover_width_with_majors_every_n() {
        // 20 s over 100 px: 5 s per major is 25 px, minor every 5 px.
        let axis = TimeAxis::new(20.0, 100).unwrap();
        let ticks: Vec<Tick> = axis.ticks(5.0, 5).unwrap().collect();

        assert_eq!(ticks.len(), 20);
        assert!(ticks.iter().all(|t| t.x >= 0.0 && t.x < 100.0));

        let majors: Vec<f64> = ticks.iter().filter(|t| t.major).map(|t| t.x).collect();
        assert_eq!(majors.len(), 4);
        for (i, x) in majors.iter().enumerate() {
            assert!((x - 25.0 * f64::from(u32::try_from(i).unwrap())).abs() < 1e-9);
        }
        assert!((ticks[1].x - 5.0).abs() < 1e-9);
        assert!(!ticks[1].major);
    }

    #[test]
    fn ticks_are_restartable() {
        let axis = TimeAxis::new(12.0, 300).unwrap();
        let ticks = axis.ticks(2.0, 4).unwrap();
        let first: Vec<Tick> = ticks.clone().collect();
        let second: Vec<Tick> = ticks.collect();
        assert_eq!(first, second);
        assert_eq!(first, axis.ticks(2.0, 4).unwrap().collect::<Vec<_>>());
    }

    #[test]
    fn single_subdivision_yields_only_majors() {
        let axis = TimeAxis::new(10.0, 100).unwrap();
        let ticks: Vec<Tick> = axis.ticks(1.0, 1).unwrap().collect();
        assert_eq!(ticks.len(), 10);
        assert!(ticks.iter().all(|t| t.major));
    }

    #[test]
    fn rejects_bad_tick_spacing() {
        let axis = TimeAxis::new(10.0, 100).unwrap();
        assert!(axis.ticks(0.0, 5).is_err());
        assert!(axis.ticks(-5.0, 5).is_err());
        assert!(axis.ticks(5.0, 0).is_err());
    }
}
