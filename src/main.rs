// file: src/main.rs
// version: 1.0.0
// guid: 48051df7-a7a7-44cf-b881-df457458731a

//! gmxsh - command-line front end for the GROMACS shell

use anyhow::Context;
use clap::Parser;
use gromacs_shell::{
    cli::{args::Commands, commands::*, Cli},
    config::ShellConfig,
    logging::logger,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ShellConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet, &config.logging.level, config.logging.format)?;

    let shutdown_signal = async {
        if signal::ctrl_c().await.is_err() {
            // No handler available; never resolve so the command runs to completion.
            std::future::pending::<()>().await;
        }
    };

    let command_future = async {
        match cli.command {
            Commands::List { json, no_docs } => list_command(config, json, no_docs).await.map(|_| 0),
            Commands::Doc { tool, long } => doc_command(config, tool, long).await.map(|_| 0),
            Commands::Run {
                tool,
                failure,
                capture,
                separate_stderr,
                input,
                flags,
            } => {
                let options = RunOptions {
                    failure: failure.map(Into::into),
                    capture,
                    separate_stderr,
                    input,
                };
                run_command(config, tool, flags, options).await
            }
            Commands::Qtot { flags } => qtot_command(config, flags).await.map(|_| 0),
            Commands::Groups { json, flags } => groups_command(config, flags, json).await.map(|_| 0),
        }
    };

    tokio::select! {
        result = command_future => {
            let status = result?;
            if status != 0 {
                std::process::exit(status);
            }
            Ok(())
        }
        _ = shutdown_signal => {
            warn!("Interrupted by user");
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
