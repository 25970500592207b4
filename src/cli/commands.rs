//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reverso Context command-line client
#[derive(Parser, Debug)]
#[command(name = "reverso-context")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Source language (overrides the config)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Target language (overrides the config)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Account email
    #[arg(long, global = true, env = "REVERSO_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "REVERSO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// User agent sent with every request
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translations of a word or phrase
    Translations {
        /// Text to translate
        text: String,
    },

    /// Usage examples with their translations
    Samples {
        /// Text to look up
        text: String,

        /// Only show samples using this translation
        #[arg(long)]
        target_text: Option<String>,

        /// Keep the service's inline markup
        #[arg(long)]
        no_cleanup: bool,

        /// Maximum number of samples
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Completions of a partial search text
    Suggestions {
        /// Partial text
        text: String,

        /// Include typo-tolerant matches
        #[arg(long)]
        fuzzy: bool,

        /// Keep the service's inline markup
        #[arg(long)]
        no_cleanup: bool,
    },

    /// Saved favorites (requires credentials)
    Favorites {
        /// Keep the service's inline markup
        #[arg(long)]
        no_cleanup: bool,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search history (requires credentials)
    History {
        /// Maximum number of entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check that the credentials are accepted
    Login,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Indented JSON
    Pretty,
}
