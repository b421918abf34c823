// file: src/logging/mod.rs
// version: 1.0.0
// guid: 0aedc4e7-6d1a-48de-af57-e7ab0cc74aa0

//! Logging setup for the GROMACS shell

pub mod logger;

pub use logger::{init_logger, with_operation_span};
