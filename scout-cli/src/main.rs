mod cli;
mod commands;
mod config;
mod state;
mod transport;
mod ui;

use std::path::Path;

use clap::Parser;
use scout_control::Endpoint;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    let command = cli.command.unwrap_or(Command::Drive {
        key_release_ms: None,
    });
    let log_file = cli.log_file.or_else(|| config.log_file.clone());
    init_logging(log_file.as_deref(), matches!(command, Command::Drive { .. }))?;

    let origin = cli.origin.unwrap_or_else(|| config.origin.clone());
    let endpoint = Endpoint::new(&origin)?;

    match command {
        Command::Drive { key_release_ms } => {
            let key_release_ms = key_release_ms.unwrap_or(config.key_release_ms);
            commands::drive_cmd::run(endpoint, key_release_ms).await
        }
        Command::Set { name, value } => commands::set_cmd::run(name, value, endpoint).await,
        Command::Status => commands::status_cmd::run(endpoint).await,
        Command::Capture { output } => commands::capture_cmd::run(output, endpoint).await,
        Command::StreamUrl => {
            println!("{}", endpoint.stream_url());
            Ok(())
        }
    }
}

/// `RUST_LOG` picks the level (default `warn`). The full-screen view owns the
/// terminal, so without a log file it gets no logging at all.
fn init_logging(log_file: Option<&Path>, fullscreen: bool) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if fullscreen => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    let _ = builder.try_init();
    Ok(())
}
