//! CLI definitions for classwork.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// classwork CLI.
#[derive(Parser)]
#[command(name = "classwork")]
#[command(about = "Object composition and construction runtime")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.classwork/config.toml)
    #[arg(short, long, global = true, env = "CLASSWORK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load and validate the configuration
    Check,

    /// Show which namespace and module path an identifier resolves to
    Resolve {
        /// Dotted class identifier, e.g. App.widgets.Button
        identifier: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List registered namespaces in match order
    Namespaces {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
