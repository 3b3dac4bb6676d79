use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use afsv_cli::commands::{sessions, summary, timeline};
use afsv_cli::{Cli, Commands, Config};
use afsv_core::JsonSessionReader;

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Sessions { json } => {
            let catalog = sessions::open_catalog(&config)?;
            sessions::list(&mut out, &catalog, *json)?;
        }
        Commands::Months { json } => {
            let catalog = sessions::open_catalog(&config)?;
            sessions::months(&mut out, &catalog, *json)?;
        }
        Commands::Days { month, json } => {
            let catalog = sessions::open_catalog(&config)?;
            sessions::days(&mut out, &catalog, *month, *json)?;
        }
        Commands::Times { month, day, json } => {
            let catalog = sessions::open_catalog(&config)?;
            sessions::times(&mut out, &catalog, *month, *day, *json)?;
        }
        Commands::Resolve { month, day, time } => {
            let catalog = sessions::open_catalog(&config)?;
            sessions::resolve(&mut out, &catalog, *month, *day, *time)?;
        }
        Commands::Summary { source } => {
            summary::run(&mut out, &JsonSessionReader, &config, source)?;
        }
        Commands::Timeline(args) => {
            timeline::run(&mut out, &JsonSessionReader, &config, args)?;
        }
    }

    out.flush()?;
    Ok(())
}
