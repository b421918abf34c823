// file: src/command/stream.rs
// version: 1.0.0
// guid: 6181a269-0bc6-4dc1-b8f3-cd175a6b132f

//! Standard stream routing for a single tool invocation

use std::fmt;

/// Where the tool's standard output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutTarget {
    /// Left connected to our own stdout
    #[default]
    Inherit,
    /// Collected and returned as text
    Capture,
    /// Discarded
    Null,
}

/// Where the tool's standard error goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrTarget {
    /// Interleaved with standard output, wherever that goes
    #[default]
    MergeIntoStdout,
    /// Collected separately and returned as text
    Capture,
    /// Left connected to our own stderr
    Inherit,
    /// Discarded
    Null,
}

/// Payload written to the tool's standard input before it is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input(String);

impl Input {
    /// Use `text` verbatim
    pub fn text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Join `lines` with newlines, ending with exactly one trailing newline
    ///
    /// This is how interactive prompts (`make_ndx`, group selection in
    /// `trjconv`) are answered. No lines gives an empty payload, which the
    /// wrapper treats as no input at all.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        let lines: Vec<String> = lines.into_iter().map(|line| line.to_string()).collect();
        if lines.is_empty() {
            return Self(String::new());
        }
        let mut payload = lines.join("\n");
        payload.push('\n');
        Self(payload)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl<S: fmt::Display> From<Vec<S>> for Input {
    fn from(lines: Vec<S>) -> Self {
        Self::lines(lines)
    }
}

impl<S: fmt::Display, const N: usize> From<[S; N]> for Input {
    fn from(lines: [S; N]) -> Self {
        Self::lines(lines)
    }
}
