//! classwork - object composition and construction runtime.
//!
//! Command-line entry point for inspecting a runtime configuration.

mod cli;
mod cmd_inspect;
mod setup;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::setup::{build_runtime, load_config};

/// Initialize console tracing. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_tracing(&config.runtime.log_level);
    tracing::debug!("classwork v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Check => cmd_inspect::check(&config),
        Commands::Resolve { identifier, format } => {
            let runtime = build_runtime(&config)?;
            cmd_inspect::resolve(&runtime, &identifier, format)
        }
        Commands::Namespaces { format } => {
            let runtime = build_runtime(&config)?;
            cmd_inspect::namespaces(&runtime, format)
        }
    }
}
