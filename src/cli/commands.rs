// file: src/cli/commands.rs
// version: 1.0.0
// guid: 40925801-f979-40d3-8429-6c58ba498d5c

//! Command implementations for the CLI
//!
//! Tool invocations block, so each command does its work on tokio's
//! blocking pool.

use crate::{
    cbook,
    command::{FailureMode, Flags, Input, Invocation, StderrTarget, StdoutTarget},
    config::ShellConfig,
    error::ShellError,
    logging::with_operation_span,
    registry::{Registry, RegistryOptions},
    Result,
};
use colored::Colorize;
use std::io::Write;
use tracing::info;

async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ShellError::other(format!("Worker task failed: {}", e)))?
}

/// Registry holding only `names`, without scraping documentation
fn registry_for(config: &ShellConfig, names: &[&str]) -> Registry {
    let options = RegistryOptions {
        scrape_docs: false,
        ..RegistryOptions::from(config)
    };
    Registry::from_names(names.iter().copied(), &options)
}

/// Probe the catalog and list available and missing tools
pub async fn list_command(config: ShellConfig, json_output: bool, no_docs: bool) -> Result<()> {
    let registry = blocking(move || {
        let mut config = config;
        if no_docs {
            config.general.scrape_docs = false;
        }
        Ok(with_operation_span("probe", || Registry::load(&config)))
    })
    .await?;

    let report = registry.report();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({}):", "Available".green().bold(), report.available.len());
    for name in &report.available {
        let summary = crate::tools::find(name).map(|spec| spec.summary).unwrap_or("");
        match report.doc_failures.get(name) {
            Some(reason) => println!("  {:<16} {} {}", name, summary, format!("[no docs: {}]", reason).yellow()),
            None => println!("  {:<16} {}", name, summary),
        }
    }

    if !report.missing.is_empty() {
        println!();
        println!("{} ({}):", "Missing".red().bold(), report.missing.len());
        for name in &report.missing {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Print the scraped documentation for one tool
pub async fn doc_command(config: ShellConfig, tool: String, long: bool) -> Result<()> {
    let text = blocking(move || {
        let registry = registry_for(&config, &[tool.as_str()]);
        registry.require(&tool)?.help(long)
    })
    .await?;

    println!("{}", text);
    Ok(())
}

/// Options for a single `run` invocation
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub failure: Option<FailureMode>,
    pub capture: bool,
    pub separate_stderr: bool,
    pub input: Vec<String>,
}

impl RunOptions {
    fn invocation(&self) -> Invocation {
        let mut invocation = Invocation::new();
        if self.capture {
            invocation = invocation.stdout(StdoutTarget::Capture);
        }
        if self.separate_stderr {
            invocation = invocation.stderr(if self.capture {
                StderrTarget::Capture
            } else {
                StderrTarget::Inherit
            });
        }
        if !self.input.is_empty() {
            invocation = invocation.input(Input::lines(&self.input));
        }
        if let Some(mode) = self.failure {
            invocation = invocation.failure(mode);
        }
        invocation
    }
}

/// Run a tool and return its exit status
pub async fn run_command(
    config: ShellConfig,
    tool: String,
    flags: Vec<String>,
    options: RunOptions,
) -> Result<i32> {
    let flags = Flags::parse_cli(&flags)?;
    let output = blocking(move || {
        let registry = registry_for(&config, &[tool.as_str()]);
        let command = registry.require(&tool)?;
        info!("Running {} {}", tool, command.arguments(&flags).join(" "));
        with_operation_span(&tool, || command.run_with(&flags, &options.invocation()))
    })
    .await?;

    if let Some(ref stdout) = output.stdout {
        print!("{}", stdout);
        std::io::stdout().flush()?;
    }
    if let Some(ref stderr) = output.stderr {
        eprint!("{}", stderr);
    }

    Ok(output.status)
}

/// Print the total charge reported by grompp
pub async fn qtot_command(config: ShellConfig, flags: Vec<String>) -> Result<()> {
    let flags = Flags::parse_cli(&flags)?;
    let qtot = blocking(move || {
        let registry = registry_for(&config, &["grompp"]);
        cbook::grompp_qtot(&registry, &flags)
    })
    .await?;

    println!("{}", qtot);
    Ok(())
}

/// Print the index groups make_ndx offers
pub async fn groups_command(config: ShellConfig, flags: Vec<String>, json_output: bool) -> Result<()> {
    let flags = Flags::parse_cli(&flags)?;
    let groups = blocking(move || {
        let registry = registry_for(&config, &["make_ndx"]);
        cbook::index_groups(&registry, &flags)
    })
    .await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        for group in &groups {
            println!("{:>3} {:<20} : {:>6} atoms", group.nr, group.name, group.natoms);
        }
    }
    Ok(())
}
