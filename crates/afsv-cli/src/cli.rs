//! Command-line argument definitions.

use std::path::PathBuf;

use afsv_core::{MonthBucket, SessionSelection, TimeOfDay};
use clap::{Parser, Subcommand};

/// Session viewer for recorded flights.
///
/// Browses saved sessions by month, day and time, and renders the event
/// timeline of an exported session recording.
#[derive(Debug, Parser)]
#[command(name = "afsv", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every saved session, oldest first.
    Sessions {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the months that have sessions.
    Months {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the days of a month that have sessions.
    Days {
        /// Month as MM/YYYY. Defaults to the most recent month.
        month: Option<MonthBucket>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List session start times on a day.
    Times {
        /// Month as MM/YYYY.
        month: MonthBucket,

        /// Day of the month.
        day: u32,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the path of the session file for a month, day and time.
    Resolve {
        /// Month as MM/YYYY.
        month: MonthBucket,

        /// Day of the month.
        day: u32,

        /// Start time as HH:MM:SS.
        time: TimeOfDay,
    },

    /// Show the heading and statistics of a session recording.
    Summary {
        #[command(flatten)]
        source: SessionSource,
    },

    /// Render the timeline of a session recording.
    Timeline(TimelineArgs),
}

/// Which recording to open: an explicit file, or a session picked by month,
/// day and time whose JSON export sits next to the session file.
#[derive(Debug, clap::Args)]
pub struct SessionSource {
    /// Session recording exported as JSON.
    #[arg(
        required_unless_present = "month",
        conflicts_with_all = ["month", "day", "time"]
    )]
    pub recording: Option<PathBuf>,

    /// Month of a saved session, as MM/YYYY.
    #[arg(long, requires_all = ["day", "time"])]
    pub month: Option<MonthBucket>,

    /// Day of the month.
    #[arg(long, requires_all = ["month", "time"])]
    pub day: Option<u32>,

    /// Start time as HH:MM:SS.
    #[arg(long, requires_all = ["month", "day"])]
    pub time: Option<TimeOfDay>,
}

impl SessionSource {
    /// The picked session, when all of month, day and time were given.
    pub fn selection(&self) -> Option<SessionSelection> {
        Some(SessionSelection {
            month: self.month?,
            day: self.day?,
            time: self.time?,
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub source: SessionSource,

    /// Timeline width in columns (overrides config, at most 4096).
    #[arg(long)]
    pub width: Option<u32>,

    /// Pointer column; snaps onto nearby markers.
    #[arg(long)]
    pub pointer: Option<f64>,

    /// Treat the pointer as released here, moving the playhead to it.
    #[arg(long, requires = "pointer")]
    pub click: bool,

    /// Playhead position in seconds.
    #[arg(long, conflicts_with = "click")]
    pub at: Option<f64>,

    /// Output the frame as JSON.
    #[arg(long)]
    pub json: bool,
}
