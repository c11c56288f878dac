//! Command-line interface definition for Promptkeep
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to serve the HTTP API and to work with the prompt
//! store directly from a terminal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptkeep - edit prompt files with automatic snapshot history
///
/// Every save writes the prompt and a timestamped copy into a per-file
/// history folder.
#[derive(Parser, Debug, Clone)]
#[command(name = "promptkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the prompt collection directory
    #[arg(long, global = true)]
    pub prompts_dir: Option<PathBuf>,

    /// Override the history archive directory
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Promptkeep
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the REST API
    Serve {
        /// Interface to bind (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List prompt files
    List,

    /// Print the current content of a prompt
    Show {
        /// Prompt file name
        filename: String,
    },

    /// Save a prompt and record a history snapshot
    ///
    /// Content comes from `--content`, from `--file`, or from stdin.
    Save {
        /// Prompt file name
        filename: String,

        /// Content to save
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read content from this file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Browse and restore history snapshots
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// Show every history folder and its snapshots, newest first
    Tree,

    /// Print the content of one snapshot
    Show {
        /// History folder (the prompt's file name)
        folder: String,

        /// Snapshot file name
        filename: String,
    },

    /// Make a snapshot the current content of its prompt
    Restore {
        /// History folder (the prompt's file name)
        folder: String,

        /// Snapshot file name
        filename: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
