//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Since when?
///
/// Tracks recurring events and reports how long it has been since each last
/// happened and how often it usually happens.
#[derive(Debug, Parser)]
#[command(name = "sw", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
///
/// `EVENT` arguments match an event name exactly, falling back to its ID.
/// `DATE` arguments accept `YYYY-MM-DD`, `today`, `yesterday`, `N days ago`
/// or `N weeks ago`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start tracking a new event.
    Add {
        /// Name of the event (e.g., "Changed air filter").
        name: String,

        /// Record a first occurrence on this date.
        #[arg(long, value_name = "DATE")]
        on: Option<String>,
    },

    /// Record that an event happened.
    Log {
        event: String,

        /// When it happened (defaults to today).
        #[arg(long, value_name = "DATE")]
        on: Option<String>,
    },

    /// Remove a recorded occurrence.
    Unlog {
        event: String,

        /// The occurrence to remove.
        #[arg(long, value_name = "DATE")]
        on: String,
    },

    /// Rename an event.
    Rename { event: String, new_name: String },

    /// Delete an event and all its occurrences. There is no undo.
    Delete { event: String },

    /// List events with time since last occurrence and average interval.
    List {
        /// Sort by most recent occurrence instead of creation order.
        #[arg(long)]
        recent: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Compute statistics as of this date instead of today.
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,
    },

    /// Show one event with all its occurrences.
    Show {
        event: String,

        /// Compute statistics as of this date instead of today.
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,
    },

    /// Show which events happened on each day of a month.
    Month {
        /// Month as YYYY-MM (defaults to the current month).
        month: Option<String>,
    },

    /// Show database location and totals.
    Status,
}
