// file: src/error.rs
// version: 1.0.0
// guid: d4579894-9b61-4037-8fe0-15988cbabc6d

use thiserror::Error;

/// Result type alias for the shell
pub type Result<T> = std::result::Result<T, ShellError>;

/// Error types for the GROMACS shell
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to find Gromacs command '{tool}'. Maybe source GMXRC first?")]
    ToolNotFound { tool: String },

    #[error("{message} ({tool} returned error code {status})")]
    ToolFailed {
        tool: String,
        status: i32,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Documentation error: {0}")]
    Documentation(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl ShellError {
    /// Create a new tool-not-found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a new tool failure error
    pub fn tool_failed(tool: impl Into<String>, status: i32, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new documentation error
    pub fn documentation(msg: impl Into<String>) -> Self {
        Self::Documentation(msg.into())
    }

    /// Create a new other error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Exit status carried by a tool failure, if any
    pub fn status(&self) -> Option<i32> {
        match self {
            Self::ToolFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the executable could not be located
    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}
