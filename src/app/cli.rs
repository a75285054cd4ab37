//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Recognizer - store labeled gestures and recognize new input
#[derive(Parser, Debug)]
#[command(name = "gesture-rec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a labeled example gesture to the store
    Add {
        /// Label to store the gesture under
        #[arg(short, long)]
        label: String,

        /// Gesture file: JSON strokes of timed points
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Recognize a gesture against the stored examples
    Recognize {
        /// Gesture file: JSON strokes of timed points
        #[arg(short, long)]
        input: PathBuf,

        /// Number of predictions to print (defaults to the config value)
        #[arg(short, long)]
        top: Option<usize>,

        /// Print predictions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored labels
    List {
        /// Show gesture ids and point counts per label
        #[arg(short, long)]
        detailed: bool,
    },

    /// Remove a single gesture by id, or every gesture under a label
    Remove {
        /// Label to remove from
        label: String,

        /// Gesture id; omit to remove the whole label
        #[arg(long)]
        id: Option<u64>,
    },

    /// Initialize configuration and an empty store
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
