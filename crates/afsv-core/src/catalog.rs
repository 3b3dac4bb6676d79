//! Session catalog: discovering saved sessions and grouping them by date.
//!
//! The catalog supports a progressive pick: a month, then a day within it,
//! then a start time on that day. Each step narrows the previous one.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{MonthBucket, SessionIdentifier, SessionSelection, TimeOfDay};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read session directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All well-formed sessions found in one storage directory.
#[derive(Debug, Clone, Default)]
pub struct SessionCatalog {
    root: PathBuf,
    sessions: Vec<SessionIdentifier>,
}

impl SessionCatalog {
    /// Scans a storage directory for session files.
    ///
    /// A missing directory yields an empty catalog. Entries that are not
    /// session files are skipped.
    pub fn scan(root: &Path) -> Result<Self, CatalogError> {
        if !root.exists() {
            tracing::debug!(path = ?root, "session directory does not exist");
            return Ok(Self::from_file_names(root, std::iter::empty::<String>()));
        }

        let io_err = |source| CatalogError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::trace!(?name, "skipping non UTF-8 file name"),
            }
        }

        Ok(Self::from_file_names(root, names))
    }

    /// Builds a catalog from raw file names, as if they were listed in `root`.
    pub fn from_file_names<I, S>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sessions = parse_session_names(names);
        sessions.sort();
        Self {
            root: root.to_path_buf(),
            sessions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sessions in ascending chronological order.
    pub fn list_sessions(&self) -> &[SessionIdentifier] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn months_present(&self) -> Vec<MonthBucket> {
        months_present(&self.sessions)
    }

    /// The month a chooser should start on: the most recent one.
    pub fn latest_month(&self) -> Option<MonthBucket> {
        self.sessions.last().map(SessionIdentifier::month)
    }

    pub fn days_in_month(&self, month: MonthBucket) -> Vec<u32> {
        days_in_month(&self.sessions, month)
    }

    pub fn times_on_day(&self, month: MonthBucket, day: u32) -> Vec<TimeOfDay> {
        times_on_day(&self.sessions, month, day)
    }

    /// Finds the catalog entry a selection points at.
    pub fn resolve(&self, selection: &SessionSelection) -> Option<SessionIdentifier> {
        self.sessions.iter().copied().find(|id| {
            id.month() == selection.month
                && id.day() == selection.day
                && id.time_of_day() == selection.time
        })
    }

    /// Full path of a session file in this catalog's directory.
    pub fn path_of(&self, id: &SessionIdentifier) -> PathBuf {
        self.root.join(id.file_name())
    }
}

/// Parses file names, keeping only well-formed session names in input order.
pub fn parse_session_names<I, S>(names: I) -> Vec<SessionIdentifier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| match SessionIdentifier::from_file_name(name.as_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::trace!(error = %e, "skipping file");
                None
            }
        })
        .collect()
}

/// Distinct months across `sessions`, in order of first occurrence.
///
/// `sessions` must already be sorted ascending for the result to be
/// ascending and duplicate-free.
pub fn months_present(sessions: &[SessionIdentifier]) -> Vec<MonthBucket> {
    let mut months: Vec<MonthBucket> = Vec::new();
    for id in sessions {
        let month = id.month();
        if months.last() != Some(&month) {
            months.push(month);
        }
    }
    months
}

/// Sorted distinct days of `month` that have at least one session.
pub fn days_in_month(sessions: &[SessionIdentifier], month: MonthBucket) -> Vec<u32> {
    let mut days: Vec<u32> = sessions
        .iter()
        .filter(|id| id.month() == month)
        .map(SessionIdentifier::day)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Sorted start times of the sessions recorded on `month`/`day`.
pub fn times_on_day(sessions: &[SessionIdentifier], month: MonthBucket, day: u32) -> Vec<TimeOfDay> {
    let mut times: Vec<TimeOfDay> = sessions
        .iter()
        .filter(|id| id.month() == month && id.day() == day)
        .map(SessionIdentifier::time_of_day)
        .collect();
    times.sort();
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::SESSION_FILE_NAME_LEN;

    const NAMES: &[&str] = &[
        "AF_20240305T101500.xml",
        "AF_20240305T091500.xml",
        "AF_20240312T170000.xml",
        "AF_20240120T080000.xml",
        "AF_20231231T235959.xml",
        "AF_20240305T101500.xml.bak",
        "readme.txt",
        "AF_2024035T101500.xml",
        "AF_20240399T101500.xml",
    ];

    fn catalog() -> SessionCatalog {
        SessionCatalog::from_file_names(Path::new("/saves"), NAMES)
    }

    fn month(s: &str) -> MonthBucket {
        s.parse().unwrap()
    }

    #[test]
    fn list_sessions_keeps_only_well_formed_names() {
        let catalog = catalog();
        let sessions = catalog.list_sessions();

        assert!(sessions.len() <= NAMES.len());
        assert_eq!(sessions.len(), 5);
        for id in sessions {
            let name = id.file_name();
            assert_eq!(name.len(), SESSION_FILE_NAME_LEN);
            assert!(NAMES.contains(&name.as_str()));
        }
    }

    #[test]
    fn list_sessions_is_sorted() {
        let catalog = catalog();
        let sessions = catalog.list_sessions();
        assert!(sessions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sessions[0].file_name(), "AF_20231231T235959.xml");
    }

    #[test]
    fn months_are_ascending_and_distinct() {
        let months = catalog().months_present();
        assert_eq!(
            months,
            vec![month("12/2023"), month("01/2024"), month("03/2024")]
        );
    }

    #[test]
    fn latest_month_is_last() {
        assert_eq!(catalog().latest_month(), Some(month("03/2024")));
    }

    #[test]
    fn days_are_strictly_ascending() {
        let days = catalog().days_in_month(month("03/2024"));
        assert_eq!(days, vec![5, 12]);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn days_of_month_without_sessions_is_empty() {
        assert!(catalog().days_in_month(month("02/2024")).is_empty());
    }

    #[test]
    fn times_are_filtered_by_month_and_day() {
        let names = [
            "AF_20240305T101500.xml",
            "AF_20240305T091500.xml",
            "AF_20240405T120000.xml",
        ];
        let catalog = SessionCatalog::from_file_names(Path::new("/saves"), names);
        let times: Vec<String> = catalog
            .times_on_day(month("03/2024"), 5)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(times, vec!["09:15:00", "10:15:00"]);
    }

    #[test]
    fn empty_catalog_has_no_months() {
        let catalog = SessionCatalog::from_file_names(Path::new("/saves"), ["junk"]);
        assert!(catalog.is_empty());
        assert!(catalog.months_present().is_empty());
        assert_eq!(catalog.latest_month(), None);
    }

    #[test]
    fn every_selection_round_trips_to_a_catalog_entry() {
        let catalog = catalog();
        for m in catalog.months_present() {
            for day in catalog.days_in_month(m) {
                for time in catalog.times_on_day(m, day) {
                    let selection = SessionSelection {
                        month: m,
                        day,
                        time,
                    };
                    let name = selection.file_name();
                    assert_eq!(name.len(), SESSION_FILE_NAME_LEN);
                    assert!(NAMES.contains(&name.as_str()), "{name} not in catalog");

                    let id = catalog.resolve(&selection).unwrap();
                    assert_eq!(id.file_name(), name);
                    assert_eq!(catalog.path_of(&id), Path::new("/saves").join(&name));
                }
            }
        }
    }

    #[test]
    fn resolve_unknown_selection_is_none() {
        let selection = SessionSelection {
            month: month("03/2024"),
            day: 6,
            time: "10:15:00".parse().unwrap(),
        };
        assert_eq!(catalog().resolve(&selection), None);
    }

    #[test]
    fn scan_reads_directory_and_skips_unrelated_entries() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["AF_20240305T101500.xml", "AF_20240306T110000.xml", "notes.txt"] {
            std::fs::write(temp.path().join(name), "<session/>").unwrap();
        }
        std::fs::create_dir(temp.path().join("AF_20240307T110000.xml")).unwrap();

        let catalog = SessionCatalog::scan(temp.path()).unwrap();
        let names: Vec<String> = catalog
            .list_sessions()
            .iter()
            .map(SessionIdentifier::file_name)
            .collect();
        assert_eq!(names, vec!["AF_20240305T101500.xml", "AF_20240306T110000.xml"]);
    }

    #[test]
    fn scan_missing_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let catalog = SessionCatalog::scan(&temp.path().join("missing")).unwrap();
        assert!(catalog.is_empty());
    }
}
