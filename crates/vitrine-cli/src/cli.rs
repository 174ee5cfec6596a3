//! Command-line arguments.

use clap::{ArgAction, Parser, Subcommand};

/// Check and inspect the content of a Vitrine site.
#[derive(Parser, Debug)]
#[command(name = "vitrine", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load every category and fail on the first invalid file
    Check,

    /// List the documents of a category in display order
    List {
        /// Category name, e.g. "products"
        category: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one document
    Show {
        /// Category name
        category: String,

        /// Document identifier (slug)
        id: String,

        /// Print the full document, render tree included, as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print static routes, from front matter only
    Paths {
        /// Category name
        category: String,
    },

    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `vitrine config` actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `categories.products.dir`
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default configuration file
    Init {
        /// Target file (defaults to the per-user config location)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
