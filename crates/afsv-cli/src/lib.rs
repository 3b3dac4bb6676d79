//! Flight session viewer CLI library.
//!
//! This crate provides the CLI interface for browsing saved sessions and
//! rendering session timelines.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, SessionSource, TimelineArgs};
pub use config::Config;
