//! Command-line interface for squares.

use clap::{Parser, Subcommand};
use squares_board::Color;
use std::path::PathBuf;

/// Squares - play against a remote computer opponent
#[derive(Parser, Debug)]
#[command(name = "squares")]
#[command(about = "Terminal client for the Squares board game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and SQUARES_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Board size for the first game
        #[arg(short, long)]
        size: Option<usize>,

        /// Color to play (white moves first)
        #[arg(long)]
        color: Option<Color>,

        /// Ruleset name sent to the server
        #[arg(long)]
        ruleset: Option<String>,
    },

    /// Probe the API health endpoint with backoff
    Health {
        /// Retries after the first failed probe
        #[arg(short, long)]
        retries: Option<u32>,
    },
}
