//! CLI subcommand implementations.

pub mod sessions;
pub mod summary;
pub mod timeline;
pub mod util;
