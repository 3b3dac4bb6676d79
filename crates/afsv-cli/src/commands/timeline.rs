//! Timeline command: renders one timeline frame in the terminal.
//!
//! One column stands for one pixel of the timeline. Rows, top to bottom:
//! recording bands, marker icons, the ruler, the playhead caret, then a
//! readout of the playhead and pointer.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use afsv_core::{
    IconKind, IntervalKind, Marker, PointerButton, SessionReader, TimelineFrame, TimelineView,
};

use super::util::{open_session, recording_path};
use crate::Config;
use crate::cli::TimelineArgs;

/// Widest timeline the terminal renderer accepts, in columns.
pub const MAX_TIMELINE_WIDTH: u32 = 4096;

#[derive(Serialize)]
struct JsonFrame<'a> {
    #[serde(flatten)]
    frame: &'a TimelineFrame,
    hovered_marker: Option<&'a Marker>,
}

pub fn run<W: Write, R: SessionReader>(
    writer: &mut W,
    reader: &R,
    config: &Config,
    args: &TimelineArgs,
) -> Result<()> {
    let width = args.width.unwrap_or(config.timeline_width);
    if width > MAX_TIMELINE_WIDTH {
        anyhow::bail!("timeline width {width} exceeds the maximum of {MAX_TIMELINE_WIDTH} columns");
    }

    let path = recording_path(config, &args.source)?;
    let stream = open_session(reader, &path)?;
    if stream.is_empty() {
        anyhow::bail!("session {} has no events", path.display());
    }

    let mut view = TimelineView::new(&stream, width, config.timeline())
        .context("failed to build timeline")?;

    if let Some(at) = args.at {
        view.seek(at);
    }
    if let Some(x) = args.pointer {
        if args.click {
            view.pointer_released(x);
        } else {
            view.pointer_moved(x, PointerButton::Released);
        }
    }

    let frame = view.frame();
    let hovered = view.marker_under_pointer();

    if args.json {
        serde_json::to_writer_pretty(
            &mut *writer,
            &JsonFrame {
                frame: &frame,
                hovered_marker: hovered.as_ref(),
            },
        )?;
        writeln!(writer)?;
        return Ok(());
    }

    write!(writer, "{}", render(&frame, hovered.as_ref()))?;
    Ok(())
}

const fn icon_char(icon: IconKind) -> char {
    match icon {
        IconKind::Picture => 'P',
        IconKind::Navdata => 'N',
        IconKind::Video => 'V',
        IconKind::Generic => '*',
    }
}

/// Column index for a pixel position, clamped to the frame.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn column(x: f64, width: usize) -> usize {
    let max = width.saturating_sub(1);
    (x.round().max(0.0) as usize).min(max)
}

fn push_row(out: &mut String, row: &[char]) {
    let line: String = row.iter().collect();
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders a frame as text.
#[allow(clippy::cast_precision_loss)]
pub fn render(frame: &TimelineFrame, hovered: Option<&Marker>) -> String {
    let width = frame.width as usize;
    let mut out = String::new();

    let mut bands = vec![' '; width];
    for (col, cell) in bands.iter_mut().enumerate() {
        let x = col as f64;
        let covering = |kind: IntervalKind| {
            frame
                .bands
                .iter()
                .any(|b| b.kind == kind && b.start_x <= x && x < b.end_x)
        };
        *cell = match (covering(IntervalKind::Video), covering(IntervalKind::Navdata)) {
            (true, true) => '#',
            (true, false) => '=',
            (false, true) => '-',
            (false, false) => ' ',
        };
    }
    push_row(&mut out, &bands);

    let mut markers = vec![' '; width];
    for glyph in &frame.markers {
        markers[column(glyph.x, width)] = icon_char(glyph.icon);
    }
    push_row(&mut out, &markers);

    let mut ruler = vec![' '; width];
    for tick in &frame.ticks {
        let cell = &mut ruler[column(tick.x, width)];
        if tick.major {
            *cell = '|';
        } else if *cell == ' ' {
            *cell = '.';
        }
    }
    push_row(&mut out, &ruler);

    let mut caret = vec![' '; width];
    caret[column(frame.playhead_x, width)] = '^';
    push_row(&mut out, &caret);

    let active = if frame.active_recordings.is_empty() {
        "idle".to_string()
    } else {
        frame
            .active_recordings
            .iter()
            .map(IntervalKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!(
        "playhead: t = {:.1} of {:.1} ({active})\n",
        frame.playhead_seconds, frame.duration_seconds
    ));

    if let Some(pointer) = &frame.pointer {
        out.push_str(&format!("pointer: {}", pointer.label));
        if let Some(marker) = hovered {
            out.push_str(&format!(" on {}", marker.icon.as_str()));
            if !marker.payload.is_empty() {
                out.push_str(&format!(" {}", marker.payload));
            }
        }
        out.push('\n');
    }

    out
}
