// file: src/command/failure.rs
// version: 1.0.0
// guid: 382e9646-9f52-4b34-9619-05724571bf82

//! What to do when a tool exits with a non-zero status

use crate::error::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Default message attached to failures
pub const DEFAULT_FAILURE_MESSAGE: &str = "Gromacs tool failed";

/// Failure policy for non-zero exit statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Return a `ToolFailed` error
    #[default]
    Raise,
    /// Log a warning and return the result
    Warn,
    /// Return the result silently
    #[serde(alias = "none")]
    Ignore,
}

impl FailureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureMode::Raise => "raise",
            FailureMode::Warn => "warn",
            FailureMode::Ignore => "ignore",
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureMode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(FailureMode::Raise),
            "warn" => Ok(FailureMode::Warn),
            "ignore" | "none" => Ok(FailureMode::Ignore),
            other => Err(ShellError::invalid_argument(format!(
                "failure mode must be one of raise, warn, ignore (got '{}')",
                other
            ))),
        }
    }
}

/// Classify an exit status; `Ok(true)` means the tool succeeded
pub fn check_failure(tool: &str, status: i32, mode: FailureMode, message: &str) -> Result<bool> {
    if status == 0 {
        return Ok(true);
    }

    match mode {
        FailureMode::Raise => Err(ShellError::tool_failed(tool, status, message)),
        FailureMode::Warn => {
            warn!(tool, status, "{}\nError code: {}", message, status);
            Ok(false)
        }
        FailureMode::Ignore => Ok(false),
    }
}
