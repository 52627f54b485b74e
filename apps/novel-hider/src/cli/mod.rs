//! # Novel Hider CLI Module
//!
//! The operator console over a stored record collection.
//!
//! ## Available Commands
//!
//! - `list` - Show tracked novels with counts, filtered and sorted
//! - `counts` - Show total and per-category counts
//! - `hidden` - Print every URL hidden from list pages
//! - `status` - Show a novel's category and control states
//! - `mark` - Categorize a novel
//! - `unmark` - Remove a novel's category
//! - `remove` - Delete one record by URL
//! - `clear` - Delete every record
//! - `site` - Show the selector configuration for a hostname

mod commands;

use crate::config::load_site_registry;
use clap::{Parser, Subcommand};
use novel_hider_core::NovelHiderError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Novel Hider - operator console
///
/// Inspect and edit the categorized novel collection that the page surfaces
/// read from.
#[derive(Parser, Debug)]
#[command(name = "novel-hider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the storage file
    #[arg(short = 'S', long, global = true, default_value = "novel-hider.json")]
    pub store: PathBuf,

    /// Storage backend: "file" (JSON slot file) or "redb" (ACID database)
    #[arg(short = 'B', long, global = true, default_value = "file")]
    pub backend: String,

    /// Storage slot holding the record collection
    #[arg(long, global = true, default_value = novel_hider_core::primitives::STORAGE_KEY)]
    pub slot: String,

    /// TOML file with extra site selector configurations
    #[arg(long, global = true)]
    pub sites: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tracked novels
    List {
        /// Category filter (all, reading, disliked, hiatus, completed)
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Sort order by last update (asc, desc)
        #[arg(short, long, default_value = "asc")]
        order: String,
    },

    /// Show total and per-category counts
    Counts,

    /// Print every URL hidden from list pages
    Hidden,

    /// Show the category and control states for a novel
    Status {
        /// Novel page URL
        url: String,

        /// Evaluate controls as seen from this chapter page
        #[arg(long)]
        chapter_url: Option<String>,
    },

    /// Categorize a novel
    Mark {
        /// Novel page URL
        url: String,

        /// Novel title
        #[arg(short, long)]
        title: String,

        /// Category (reading, disliked, hiatus, completed)
        #[arg(short, long)]
        category: String,

        /// Chapter to track (reading and hiatus only)
        #[arg(long)]
        chapter_url: Option<String>,

        /// Title of the tracked chapter
        #[arg(long)]
        chapter_title: Option<String>,
    },

    /// Remove a novel's category
    Unmark {
        /// Novel page URL
        url: String,
    },

    /// Delete one record by URL
    Remove {
        /// Novel page URL
        url: String,
    },

    /// Delete every record
    Clear {
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the selector configuration for a hostname
    Site {
        /// Hostname, e.g. www.twkan.com
        hostname: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), NovelHiderError> {
    let json_mode = cli.json_mode;
    let store = StoreArgs {
        path: cli.store,
        backend: cli.backend,
        slot: cli.slot,
    };

    match cli.command {
        Some(Commands::List { filter, order }) => cmd_list(&store, json_mode, &filter, &order),
        Some(Commands::Counts) => cmd_counts(&store, json_mode),
        Some(Commands::Hidden) => cmd_hidden(&store, json_mode),
        Some(Commands::Status { url, chapter_url }) => {
            cmd_status(&store, json_mode, &url, chapter_url.as_deref())
        }
        Some(Commands::Mark {
            url,
            title,
            category,
            chapter_url,
            chapter_title,
        }) => cmd_mark(
            &store,
            json_mode,
            &url,
            &title,
            &category,
            chapter_url.as_deref(),
            chapter_title.as_deref(),
        ),
        Some(Commands::Unmark { url }) => cmd_unmark(&store, json_mode, &url),
        Some(Commands::Remove { url }) => cmd_remove(&store, json_mode, &url),
        Some(Commands::Clear { yes }) => cmd_clear(&store, json_mode, yes),
        Some(Commands::Site { hostname }) => {
            let registry = load_site_registry(cli.sites.as_deref())?;
            cmd_site(&registry, json_mode, &hostname)
        }
        None => {
            // No subcommand - show counts by default
            cmd_counts(&store, json_mode)
        }
    }
}
