//! Catalog commands: the month → day → time session chooser.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use afsv_core::{MonthBucket, SessionCatalog, SessionIdentifier, SessionSelection, TimeOfDay};

/// Scans the configured session directory.
pub fn open_catalog(config: &crate::Config) -> Result<SessionCatalog> {
    let catalog = SessionCatalog::scan(&config.sessions_dir)
        .with_context(|| format!("failed to scan {}", config.sessions_dir.display()))?;
    tracing::debug!(
        sessions = catalog.list_sessions().len(),
        dir = %config.sessions_dir.display(),
        "scanned session catalog"
    );
    Ok(catalog)
}

fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Lists every session with its heading.
pub fn list<W: Write>(writer: &mut W, catalog: &SessionCatalog, json: bool) -> Result<()> {
    let sessions = catalog.list_sessions();
    if json {
        return write_json(writer, sessions);
    }

    if sessions.is_empty() {
        writeln!(writer, "No sessions found in {}", catalog.root().display())?;
        return Ok(());
    }
    for id in sessions {
        writeln!(writer, "{}  {}", id.file_name(), id.title())?;
    }
    Ok(())
}

pub fn months<W: Write>(writer: &mut W, catalog: &SessionCatalog, json: bool) -> Result<()> {
    let months = catalog.months_present();
    if json {
        return write_json(writer, &months);
    }
    for month in months {
        writeln!(writer, "{month}")?;
    }
    Ok(())
}

/// Lists days of `month`, or of the most recent month when none is given.
pub fn days<W: Write>(
    writer: &mut W,
    catalog: &SessionCatalog,
    month: Option<MonthBucket>,
    json: bool,
) -> Result<()> {
    let Some(month) = month.or_else(|| catalog.latest_month()) else {
        if json {
            return write_json(writer, &Vec::<u32>::new());
        }
        writeln!(writer, "No sessions found in {}", catalog.root().display())?;
        return Ok(());
    };

    let days = catalog.days_in_month(month);
    if json {
        return write_json(writer, &days);
    }
    for day in days {
        writeln!(writer, "{day}")?;
    }
    Ok(())
}

pub fn times<W: Write>(
    writer: &mut W,
    catalog: &SessionCatalog,
    month: MonthBucket,
    day: u32,
    json: bool,
) -> Result<()> {
    let times = catalog.times_on_day(month, day);
    if json {
        return write_json(writer, &times);
    }
    for time in times {
        writeln!(writer, "{time}")?;
    }
    Ok(())
}

/// The catalog entry for a month/day/time pick.
pub fn find(catalog: &SessionCatalog, selection: &SessionSelection) -> Result<SessionIdentifier> {
    catalog.resolve(selection).with_context(|| {
        format!(
            "no session {} in {}",
            selection.file_name(),
            catalog.root().display()
        )
    })
}

/// Prints the full path of the selected session.
pub fn resolve<W: Write>(
    writer: &mut W,
    catalog: &SessionCatalog,
    month: MonthBucket,
    day: u32,
    time: TimeOfDay,
) -> Result<()> {
    let id = find(catalog, &SessionSelection { month, day, time })?;
    writeln!(writer, "{}", catalog.path_of(&id).display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use insta::assert_snapshot;

    fn catalog() -> SessionCatalog {
        SessionCatalog::from_file_names(
            Path::new("/saves"),
            [
                "AF_20240305T101500.xml",
                "AF_20240305T091500.xml",
                "AF_20240312T170000.xml",
                "AF_20231231T235959.xml",
                "thumbs.db",
            ],
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn list_shows_file_and_title() {
        let output = render(|w| list(w, &catalog(), false));
        assert_snapshot!(output, @r"
        AF_20231231T235959.xml  31/12/2023 23:59:59
        AF_20240305T091500.xml  5/03/2024 09:15:00
        AF_20240305T101500.xml  5/03/2024 10:15:00
        AF_20240312T170000.xml  12/03/2024 17:00:00
        ");
    }

    #[test]
    fn list_empty_catalog() {
        let empty = SessionCatalog::from_file_names(Path::new("/saves"), ["x"]);
        let output = render(|w| list(w, &empty, false));
        assert_eq!(output, "No sessions found in /saves\n");
    }

    #[test]
    fn months_are_listed_oldest_first() {
        let output = render(|w| months(w, &catalog(), false));
        assert_eq!(output, "12/2023\n03/2024\n");
    }

    #[test]
    fn days_default_to_latest_month() {
        let output = render(|w| days(w, &catalog(), None, false));
        assert_eq!(output, "5\n12\n");

        let december = "12/2023".parse().unwrap();
        let output = render(|w| days(w, &catalog(), Some(december), true));
        let parsed: Vec<u32> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec![31]);
    }

    #[test]
    fn times_as_json() {
        let march = "03/2024".parse().unwrap();
        let output = render(|w| times(w, &catalog(), march, 5, true));
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["09:15:00", "10:15:00"]);
    }

    #[test]
    fn resolve_prints_path() {
        let march = "03/2024".parse().unwrap();
        let time = "09:15:00".parse().unwrap();
        let output = render(|w| resolve(w, &catalog(), march, 5, time));
        assert_eq!(
            output.trim_end(),
            Path::new("/saves")
                .join("AF_20240305T091500.xml")
                .display()
                .to_string()
        );
    }

    #[test]
    fn resolve_unknown_session_fails() {
        let march = "03/2024".parse().unwrap();
        let time = "09:15:01".parse().unwrap();
        let mut output = Vec::new();
        let err = resolve(&mut output, &catalog(), march, 5, time).unwrap_err();
        assert!(err.to_string().contains("AF_20240305T091501.xml"));
    }
}
