// file: src/cli/args.rs
// version: 1.0.0
// guid: e591072f-3ae1-482c-b0c9-cc77fcd0f889

//! Command line argument definitions

use crate::command::FailureMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gmxsh")]
#[command(about = "Run GROMACS tools with keyword-style flags and harvest their documentation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file applied after the user and project files
    #[arg(long, global = true, env = "GMXSHELL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the tool catalog and list available and missing tools
    List {
        #[arg(short, long)]
        json: bool,

        #[arg(long, help = "Skip running each tool with -h")]
        no_docs: bool,
    },

    /// Show the documentation scraped from a tool's help output
    Doc {
        tool: String,

        #[arg(long, help = "Also describe the calling conventions")]
        long: bool,
    },

    /// Run a tool; flags are given as NAME, NAME=VALUE or NAME=true|false
    Run {
        tool: String,

        #[arg(long, value_enum)]
        failure: Option<FailureArg>,

        #[arg(short, long, help = "Capture the tool output and print it afterwards")]
        capture: bool,

        #[arg(long, help = "Keep standard error separate instead of merging it into stdout")]
        separate_stderr: bool,

        #[arg(short, long = "input", value_name = "LINE", help = "Line fed to the tool's stdin (repeatable)")]
        input: Vec<String>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        flags: Vec<String>,
    },

    /// Run grompp and print the total charge of the system
    Qtot {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        flags: Vec<String>,
    },

    /// List the index groups make_ndx offers
    Groups {
        #[arg(short, long)]
        json: bool,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        flags: Vec<String>,
    },
}

/// Failure policy argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum FailureArg {
    Raise,
    Warn,
    Ignore,
}

impl From<FailureArg> for FailureMode {
    fn from(arg: FailureArg) -> Self {
        match arg {
            FailureArg::Raise => FailureMode::Raise,
            FailureArg::Warn => FailureMode::Warn,
            FailureArg::Ignore => FailureMode::Ignore,
        }
    }
}
