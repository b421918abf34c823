// file: src/command/mod.rs
// version: 1.0.0
// guid: 976344fd-28a0-4980-a886-8b8b83b2b5f2

//! Command wrapper for GROMACS tools
//!
//! Flag marshalling, stream routing, failure policy and the wrapper itself.

pub mod failure;
pub mod flags;
pub mod stream;
pub mod wrapper;

pub use failure::{check_failure, FailureMode};
pub use flags::{negate_flag, normalize_flag, FlagValue, Flags};
pub use stream::{Input, StderrTarget, StdoutTarget};
pub use wrapper::{
    extract_docs, GromacsCommand, GromacsCommandBuilder, Invocation, RunOutput, HELP_SWITCH,
    NO_DOCS_PLACEHOLDER,
};
