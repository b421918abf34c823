// file: src/cli/mod.rs
// version: 1.0.0
// guid: 3c8e5841-e9b3-485e-93ff-3bf662b5e53f

//! Command line interface for the GROMACS shell

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
