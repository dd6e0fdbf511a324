use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scout",
    about = "Remote control for the Scout rover",
    version,
    arg_required_else_help = false
)]
pub struct Cli {
    /// Rover address, e.g. http://192.168.4.1 (overrides the config file)
    #[arg(long, global = true)]
    pub origin: Option<String>,
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Drive interactively with the arrow keys (default)
    Drive {
        /// Treat a key as released after this long without a repeat
        #[arg(long)]
        key_release_ms: Option<u64>,
    },
    /// Set a device setting, e.g. `scout set flash 40` or `scout set flash=40`
    Set {
        /// Setting name (flash, quality, framesize, speed, ltrim, rtrim, ...),
        /// or `name=value`
        name: String,
        /// New value, when not given as `name=value`
        #[arg(allow_negative_numbers = true)]
        value: Option<String>,
    },
    /// Print camera status reported by the rover
    Status,
    /// Save a single camera frame
    Capture {
        /// Output file
        #[arg(short, long, default_value = "capture.jpg")]
        output: PathBuf,
    },
    /// Print the URL of the video stream
    StreamUrl,
}
