//! AIFA CLI Library
//!
//! A personal archive for files produced by AI models.
//!
//! # Overview
//!
//! - **Adding files**: upload a file or paste text with its model and tags (`aifa add`)
//! - **Dashboard**: headline counts and the most recent files (`aifa list`)
//! - **Browsing**: free-text search with a model filter (`aifa search`)
//! - **Preview**: metadata plus highlighted content (`aifa show`)
//! - **Copy / download**: clipboard or `<name>.<type>` on disk (`aifa copy`, `aifa download`)
//! - **Backup**: versioned JSON export and wholesale import (`aifa export`, `aifa import`)
//! - **Configuration**: data directory and storage backend (`aifa config`)
//!
//! The [`store::RecordStore`] is the single owner of the collection; it
//! persists through any [`kv::KeyValueStore`].

pub mod commands;
pub mod config;
pub mod error;
pub mod intake;
pub mod kv;
pub mod preview;
pub mod store;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use store::{NewRecord, RecordStore, StoreError};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AIFA - AI Files Archive
#[derive(Parser, Debug)]
#[command(name = "aifa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (overrides config file and AIFA_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: file or sqlite
    #[arg(long, global = true, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Print the full command reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a file, pasted text, or an empty placeholder
    Add {
        /// File to archive
        path: Option<PathBuf>,

        /// AI model the file came from (chatgpt, deepseek, grok, claude, other)
        #[arg(short, long)]
        ai: Option<String>,

        /// Name (defaults to the file name without extension)
        #[arg(short, long)]
        name: Option<String>,

        /// Content type (defaults from the file extension, else text)
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,

        /// Description (defaults to the file name and size)
        #[arg(short, long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Read the content from standard input
        #[arg(long, conflicts_with_all = ["path", "content"])]
        stdin: bool,

        /// Content given inline
        #[arg(long, conflicts_with = "path")]
        content: Option<String>,
    },

    /// Show headline counts and the most recent files
    List {
        /// Number of files to show
        #[arg(short, long, default_value_t = commands::list::DEFAULT_RECENT_LIMIT)]
        limit: usize,

        /// Output format
        #[arg(short, long, default_value = "table", value_parser = ["table", "compact", "json"])]
        format: String,
    },

    /// Search names, descriptions, tags, types and models
    Search {
        /// Search terms (empty lists everything)
        query: Vec<String>,

        /// Restrict to one model, or `all`
        #[arg(long, default_value = "all")]
        filter: String,

        /// Output format
        #[arg(short, long, default_value = "table", value_parser = ["table", "compact", "json"])]
        format: String,
    },

    /// Show a file with highlighted content
    Show {
        /// File id
        id: i64,

        /// Print the content without metadata or colour
        #[arg(long)]
        plain: bool,
    },

    /// Copy a file's content to the clipboard
    Copy {
        /// File id
        id: i64,
    },

    /// Write a file to disk as <name>.<type>
    Download {
        /// File id
        id: i64,

        /// Target directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a file from the archive
    Delete {
        /// File id
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show archive statistics
    Stats {
        /// Include other/unrecognized models and the type and date breakdowns
        #[arg(short, long)]
        detailed: bool,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the archive as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace the archive with the files of an export
    Import {
        /// Export file to read
        file: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,

    /// Print the config file location
    Path,
}
