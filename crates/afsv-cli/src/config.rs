//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use afsv_core::TimelineConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `AF_YYYYMMDDTHHMMSS.xml` session files.
    pub sessions_dir: PathBuf,

    /// Columns used when rendering a timeline in the terminal.
    pub timeline_width: u32,

    /// Pointer-to-marker snap distance in columns.
    pub snap_tolerance_px: f64,

    pub seconds_per_major_tick: f64,

    pub minor_ticks_per_major: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sessions_dir", &self.sessions_dir)
            .field("timeline_width", &self.timeline_width)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        let timeline = TimelineConfig::default();
        Self {
            sessions_dir: default_sessions_dir(),
            timeline_width: 100,
            snap_tolerance_px: timeline.snap_tolerance_px,
            seconds_per_major_tick: timeline.seconds_per_major_tick,
            minor_ticks_per_major: timeline.minor_ticks_per_major,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (AFSV_*)
        figment = figment.merge(Env::prefixed("AFSV_"));

        figment.extract()
    }

    /// Timeline tunables for the core view.
    pub const fn timeline(&self) -> TimelineConfig {
        TimelineConfig {
            snap_tolerance_px: self.snap_tolerance_px,
            seconds_per_major_tick: self.seconds_per_major_tick,
            minor_ticks_per_major: self.minor_ticks_per_major,
        }
    }
}

/// Returns the platform-specific config directory for afsv.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("afsv"))
}

/// Where the flight software saves sessions: `~/AutoFlightSaves/Sessions`.
pub fn default_sessions_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("AutoFlightSaves")
        .join("Sessions")
}
