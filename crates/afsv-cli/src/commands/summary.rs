//! Summary command: heading and statistics of one session.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use afsv_core::{EventStream, SessionReader};

use super::util::{open_session, recording_path, session_id_for};
use crate::{Config, SessionSource};

pub fn run<W: Write, R: SessionReader>(
    writer: &mut W,
    reader: &R,
    config: &Config,
    source: &SessionSource,
) -> Result<()> {
    let path = recording_path(config, source)?;
    let stream = open_session(reader, &path)?;
    write_summary(writer, &path, &stream)
}

fn write_summary<W: Write>(writer: &mut W, path: &Path, stream: &EventStream) -> Result<()> {
    if let Some(id) = session_id_for(path) {
        writeln!(writer, "{}", id.title())?;
    }

    if stream.is_empty() {
        writeln!(writer, "Session has no events.")?;
        return Ok(());
    }
    writeln!(writer, "{}", stream.summary_line())?;

    if !stream.picture_paths().is_empty() {
        writeln!(writer, "Pictures:")?;
        for picture in stream.picture_paths() {
            writeln!(writer, "- {}", picture.display())?;
        }
    }
    Ok(())
}
