// file: src/lib.rs
// version: 1.0.0
// guid: 737c0c34-8013-4ad0-9120-4463fe74989c

//! # GROMACS shell
//!
//! A thin shell around the GROMACS command-line tools. Flags are given as
//! name/value pairs and turned into command-line arguments, the tool is run
//! as a child process, and its exit status is checked against a failure
//! policy. Each tool's `-h` output is harvested as its documentation.
//!
//! ```no_run
//! use gromacs_shell::{Flags, GromacsCommand, Invocation};
//!
//! let g_dist = GromacsCommand::builder("g_dist").switch("v").build()?;
//! let flags = Flags::new()
//!     .set("s", "topol.tpr")
//!     .set("f", "md.xtc")
//!     .set("o", "dist.xvg")
//!     .set("dist", 1.2);
//! let out = g_dist.run_with(&flags, &Invocation::new().input(["Protein", "SOL"]))?;
//! assert_eq!(out.status, 0);
//! # Ok::<(), gromacs_shell::ShellError>(())
//! ```

pub mod cbook;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod tools;
pub mod utils;

pub use command::{FailureMode, FlagValue, Flags, GromacsCommand, Input, Invocation, RunOutput};
pub use error::{Result, ShellError};
pub use registry::Registry;

/// Version information for the shell
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
