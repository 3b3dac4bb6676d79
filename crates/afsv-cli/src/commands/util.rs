//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use afsv_core::{
    EventStream, SessionCatalog, SessionIdentifier, SessionReader, types::SESSION_FILE_EXTENSION,
};

use super::sessions::{find, open_catalog};
use crate::{Config, SessionSource};

/// Extension of a session's exported recording, saved next to the session.
const RECORDING_EXTENSION: &str = "json";

/// Reads a session recording. Failures are logged once and returned; there
/// is no retry.
pub fn open_session<R: SessionReader>(reader: &R, path: &Path) -> Result<EventStream> {
    match reader.read_session(path) {
        Ok(recording) => {
            tracing::info!(path = %path.display(), "opened session");
            Ok(EventStream::from_recording(recording))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "could not open session");
            Err(e).with_context(|| format!("could not open session {}", path.display()))
        }
    }
}

/// Recovers the session identifier from an exported recording's file name.
///
/// `AF_20240305T101500.json` maps to the session `AF_20240305T101500.xml`.
pub fn session_id_for(path: &Path) -> Option<SessionIdentifier> {
    let stem = path.file_stem()?.to_str()?;
    SessionIdentifier::from_file_name(&format!("{stem}{SESSION_FILE_EXTENSION}")).ok()
}

/// Exported recording of a catalog session: same name, `.json` extension.
pub fn recording_path_of(catalog: &SessionCatalog, id: &SessionIdentifier) -> PathBuf {
    catalog.path_of(id).with_extension(RECORDING_EXTENSION)
}

/// Path of the recording named on the command line, resolving a month/day/time
/// pick through the catalog.
pub fn recording_path(config: &Config, source: &SessionSource) -> Result<PathBuf> {
    if let Some(path) = &source.recording {
        return Ok(path.clone());
    }
    let selection = source
        .selection()
        .context("give a recording path or --month, --day and --time")?;

    let catalog = open_catalog(config)?;
    let id = find(&catalog, &selection)?;
    let path = recording_path_of(&catalog, &id);
    tracing::debug!(session = %id, path = %path.display(), "resolved picked session");
    Ok(path)
}
