//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quotebook")]
#[command(about = "Terminal quote manager with remote sync", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new quotebook
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Remote endpoint serving posts to sync against
        #[arg(long)]
        remote_url: Option<String>,
    },

    /// Add a quote
    Add {
        /// Quote text
        text: String,

        /// Quote category
        #[arg(short, long)]
        category: String,
    },

    /// List quotes
    List {
        /// Category to list (default: the selected category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List categories, marking the selected one
    Categories,

    /// Show a random quote
    Random {
        /// Category to pick from (default: the selected category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Select a category ("all" for every quote) and show its first quote
    Filter {
        category: String,
    },

    /// Export all quotes as pretty-printed JSON
    Export {
        #[arg(default_value = "quotes.json")]
        path: PathBuf,
    },

    /// Append quotes from a JSON file
    Import {
        path: PathBuf,
    },

    /// Merge with the remote snapshot once
    Sync,

    /// Interactive session with periodic sync
    Shell {
        /// Seconds between syncs (default: sync_interval_secs from config)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
