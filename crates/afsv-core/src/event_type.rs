//! Event kind enum as the single source of truth for event type strings.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kinds of events written to a session recording.
///
/// The set is open: names this crate does not know are carried through
/// unchanged as [`EventKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    PictureTaken,
    NavdataRecordingStart,
    NavdataRecordingStop,
    VideoRecordingStart,
    VideoRecordingStop,
    Other(String),
}

/// Recordings that span a time range, bounded by a start and a stop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Navdata,
    Video,
}

impl IntervalKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Navdata => "navdata",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of an interval an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    Stop,
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PictureTaken => "PictureTaken",
            Self::NavdataRecordingStart => "NavdataRecordingStart",
            Self::NavdataRecordingStop => "NavdataRecordingStop",
            Self::VideoRecordingStart => "VideoRecordingStart",
            Self::VideoRecordingStop => "VideoRecordingStop",
            Self::Other(name) => name,
        }
    }

    /// The interval this event opens or closes, if any.
    pub const fn interval_edge(&self) -> Option<(IntervalKind, Edge)> {
        match self {
            Self::NavdataRecordingStart => Some((IntervalKind::Navdata, Edge::Start)),
            Self::NavdataRecordingStop => Some((IntervalKind::Navdata, Edge::Stop)),
            Self::VideoRecordingStart => Some((IntervalKind::Video, Edge::Start)),
            Self::VideoRecordingStop => Some((IntervalKind::Video, Edge::Stop)),
            Self::PictureTaken | Self::Other(_) => None,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PictureTaken" => Self::PictureTaken,
            "NavdataRecordingStart" => Self::NavdataRecordingStart,
            "NavdataRecordingStop" => Self::NavdataRecordingStop,
            "VideoRecordingStart" => Self::VideoRecordingStart,
            "VideoRecordingStop" => Self::VideoRecordingStop,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_known_variants() {
        let variants = [
            EventKind::PictureTaken,
            EventKind::NavdataRecordingStart,
            EventKind::NavdataRecordingStop,
            EventKind::VideoRecordingStart,
            EventKind::VideoRecordingStop,
        ];

        for variant in &variants {
            let parsed = EventKind::from(variant.to_string().as_str());
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
            assert!(parsed.is_known());
        }
    }

    #[test]
    fn unknown_names_pass_through() {
        let kind = EventKind::from("TakeoffRequested");
        assert_eq!(kind, EventKind::Other("TakeoffRequested".to_string()));
        assert_eq!(kind.to_string(), "TakeoffRequested");
        assert!(!kind.is_known());
        assert_eq!(kind.interval_edge(), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(!EventKind::from("picturetaken").is_known());
    }

    #[test]
    fn interval_edges() {
        assert_eq!(
            EventKind::VideoRecordingStart.interval_edge(),
            Some((IntervalKind::Video, Edge::Start))
        );
        assert_eq!(
            EventKind::NavdataRecordingStop.interval_edge(),
            Some((IntervalKind::Navdata, Edge::Stop))
        );
        assert_eq!(EventKind::PictureTaken.interval_edge(), None);
    }

    #[test]
    fn serde_uses_plain_names() {
        let json = serde_json::to_string(&EventKind::VideoRecordingStop).unwrap();
        assert_eq!(json, "\"VideoRecordingStop\"");
        let parsed: EventKind = serde_json::from_str("\"Landing\"").unwrap();
        assert_eq!(parsed, EventKind::Other("Landing".to_string()));
    }
}
