// file: src/command/wrapper.rs
// version: 1.0.0
// guid: 6d311c21-d351-4574-b288-7452a824a780

//! Wrapper around a single GROMACS tool
//!
//! A [`GromacsCommand`] holds a tool name, the program it resolved to and a
//! set of default flags. Running it merges call-time flags over the defaults,
//! spawns the program, feeds standard input, waits for it and classifies the
//! exit status according to the configured [`FailureMode`].

use super::failure::{check_failure, FailureMode, DEFAULT_FAILURE_MESSAGE};
use super::flags::{normalize_flag, FlagValue, Flags};
use super::stream::{Input, StderrTarget, StdoutTarget};
use crate::error::{Result, ShellError};
use crate::utils::system::locate_tool;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Switch that makes a GROMACS tool print its usage
pub const HELP_SWITCH: &str = "h";

/// Returned when the help output has no `DESCRIPTION` section
pub const NO_DOCS_PLACEHOLDER: &str = "(No Gromacs documentation available)";

static DOC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^.*?(?P<DOCS>DESCRIPTION.*)$").expect("doc pattern is valid"));

const CALL_CONVENTIONS: &str = "\
Flags are passed as name/value pairs; the leading dash is optional.
  switch            -> -name
  true              -> -name
  false             -> -noname
  value             -> -name value
  [v1, v2, ...]     -> -name v1 v2 ...
Call-time flags replace the defaults given at construction.

Invocation options:
  input     string fed verbatim to stdin, or lines joined with newlines
            (including a trailing one)
  stdout    inherit (default), capture, null
  stderr    merge into stdout (default), capture, inherit, null
  failure   raise, warn, ignore; overrides the command's policy

Returns (status, stdout, stderr); stdout is only filled when captured and
stderr only when captured separately.";

/// Extract everything from the `DESCRIPTION` marker onwards
pub fn extract_docs(help_text: &str) -> Option<&str> {
    DOC_PATTERN
        .captures(help_text)
        .and_then(|caps| caps.name("DOCS"))
        .map(|m| m.as_str())
}

/// Per-call options that are not tool flags
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub stdout: StdoutTarget,
    pub stderr: StderrTarget,
    pub input: Option<Input>,
    pub failure: Option<FailureMode>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture standard output (with standard error merged, unless changed)
    pub fn capture(mut self) -> Self {
        self.stdout = StdoutTarget::Capture;
        self
    }

    pub fn stdout(mut self, target: StdoutTarget) -> Self {
        self.stdout = target;
        self
    }

    pub fn stderr(mut self, target: StderrTarget) -> Self {
        self.stderr = target;
        self
    }

    pub fn input(mut self, input: impl Into<Input>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn failure(mut self, mode: FailureMode) -> Self {
        self.failure = Some(mode);
        self
    }
}

/// Result of one invocation: `(status, stdout, stderr)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit status; `-1` if the process was terminated by a signal
    pub status: i32,
    /// Captured standard output, `None` when it was not captured
    pub stdout: Option<String>,
    /// Captured standard error, `None` when merged or not captured
    pub stderr: Option<String>,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Captured standard output, or an empty string
    pub fn stdout_text(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    pub fn into_parts(self) -> (i32, Option<String>, Option<String>) {
        (self.status, self.stdout, self.stderr)
    }
}

/// Builder for [`GromacsCommand`]
#[derive(Debug, Clone)]
pub struct GromacsCommandBuilder {
    name: String,
    defaults: Flags,
    failure: FailureMode,
    extra_doc: Option<String>,
    env: BTreeMap<String, String>,
    current_dir: Option<PathBuf>,
    search_path: Option<Vec<PathBuf>>,
}

impl GromacsCommandBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: Flags::new(),
            failure: FailureMode::default(),
            extra_doc: None,
            env: BTreeMap::new(),
            current_dir: None,
            search_path: None,
        }
    }

    /// Boolean switch given positionally, e.g. `"v"`
    pub fn switch(mut self, flag: &str) -> Self {
        self.defaults.insert(flag, FlagValue::On);
        self
    }

    pub fn flag(mut self, name: &str, value: impl Into<FlagValue>) -> Self {
        self.defaults.insert(name, value.into());
        self
    }

    pub fn flags(mut self, flags: &Flags) -> Self {
        self.defaults.merge(flags);
        self
    }

    pub fn failure(mut self, mode: FailureMode) -> Self {
        self.failure = mode;
        self
    }

    /// Additional documentation appended to the scraped help text
    pub fn doc(mut self, extra: impl Into<String>) -> Self {
        self.extra_doc = Some(extra.into());
        self
    }

    /// Extra environment variable for the child process
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Directories searched instead of `PATH`
    pub fn search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        self.search_path = if dirs.is_empty() { None } else { Some(dirs) };
        self
    }

    /// Resolve the program and build the command
    ///
    /// Fails with [`ShellError::ToolNotFound`] if the tool is not on the
    /// search path.
    pub fn build(self) -> Result<GromacsCommand> {
        let program = locate_tool(&self.name, self.search_path.as_deref())?;
        debug!("Resolved {} to {}", self.name, program.display());

        Ok(GromacsCommand {
            name: self.name,
            program,
            defaults: self.defaults,
            failure: self.failure,
            extra_doc: self.extra_doc,
            env: self.env,
            current_dir: self.current_dir,
            docs: OnceCell::new(),
        })
    }
}

/// A configured GROMACS tool, ready to run
#[derive(Debug)]
pub struct GromacsCommand {
    name: String,
    program: PathBuf,
    defaults: Flags,
    failure: FailureMode,
    extra_doc: Option<String>,
    env: BTreeMap<String, String>,
    current_dir: Option<PathBuf>,
    docs: OnceCell<String>,
}

impl GromacsCommand {
    pub fn builder(name: impl Into<String>) -> GromacsCommandBuilder {
        GromacsCommandBuilder::new(name)
    }

    /// Build with no defaults, looking the tool up on `PATH`
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder(name).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn defaults(&self) -> &Flags {
        &self.defaults
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure
    }

    pub fn extra_doc(&self) -> Option<&str> {
        self.extra_doc.as_deref()
    }

    /// Serialized arguments for a call with `overrides`
    pub fn arguments(&self, overrides: &Flags) -> Vec<String> {
        self.defaults.merged(overrides).to_args()
    }

    /// Run with `overrides`, stdout passed through and stderr merged
    pub fn run(&self, overrides: &Flags) -> Result<RunOutput> {
        self.run_with(overrides, &Invocation::default())
    }

    /// Run with `overrides` and explicit stream handling
    pub fn run_with(&self, overrides: &Flags, invocation: &Invocation) -> Result<RunOutput> {
        let args = self.arguments(overrides);
        self.execute(&args, invocation)
    }

    /// Unspawned process for this tool with merged arguments
    ///
    /// Standard streams are left at their defaults so the caller can wire
    /// up pipelines between tools.
    pub fn command(&self, overrides: &Flags) -> Command {
        self.base_command(&self.arguments(overrides))
    }

    /// Scraped help text, plus any extra documentation
    ///
    /// The tool is run with `-h` at most once per instance. A non-zero exit
    /// from `-h` is a [`ShellError::Documentation`] whatever the failure
    /// policy, logs nothing, and is not cached.
    pub fn documentation(&self) -> Result<String> {
        let scraped = self.docs.get_or_try_init(|| self.scrape_docs())?;
        Ok(match &self.extra_doc {
            Some(extra) => format!(
                "{}\nAdditional documentation:\n{}\n{}",
                scraped,
                "=".repeat(25),
                extra
            ),
            None => scraped.clone(),
        })
    }

    /// Scraped help text if it has been fetched already
    pub fn cached_documentation(&self) -> Option<&str> {
        self.docs.get().map(String::as_str)
    }

    /// Human readable help; `long` adds the calling conventions
    pub fn help(&self, long: bool) -> Result<String> {
        let mut text = format!("\ncommand: {}\n\n\n{}\n", self.name, self.documentation()?);
        if long {
            text.push_str("\ncall method: command():\n\n");
            text.push_str(CALL_CONVENTIONS);
            text.push('\n');
        }
        Ok(text)
    }

    fn scrape_docs(&self) -> Result<String> {
        let args = vec![normalize_flag(HELP_SWITCH)];
        // A failing `-h` is reported here, never through the failure policy.
        let invocation = Invocation::new().capture().failure(FailureMode::Ignore);
        let output = self.execute(&args, &invocation)?;
        if !output.success() {
            return Err(ShellError::documentation(format!(
                "{} {} returned error code {}",
                self.name, args[0], output.status
            )));
        }
        let docs = extract_docs(output.stdout_text()).unwrap_or(NO_DOCS_PLACEHOLDER);
        Ok(docs.to_string())
    }

    fn base_command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).envs(&self.env);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn execute(&self, args: &[String], invocation: &Invocation) -> Result<RunOutput> {
        debug!("Executing {} with args: {:?}", self.name, args);
        let mut cmd = self.base_command(args);

        let input = invocation.input.as_ref().filter(|input| !input.is_empty());
        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        // Merged capture goes through one file shared by both streams so the
        // interleaving matches what the tool wrote.
        let mut merged_sink: Option<File> = None;
        match (invocation.stdout, invocation.stderr) {
            (StdoutTarget::Capture, StderrTarget::MergeIntoStdout) => {
                let sink = tempfile::tempfile()?;
                cmd.stdout(Stdio::from(sink.try_clone()?));
                cmd.stderr(Stdio::from(sink.try_clone()?));
                merged_sink = Some(sink);
            }
            (stdout, stderr) => {
                cmd.stdout(match stdout {
                    StdoutTarget::Inherit => Stdio::inherit(),
                    StdoutTarget::Capture => Stdio::piped(),
                    StdoutTarget::Null => Stdio::null(),
                });
                cmd.stderr(match stderr {
                    StderrTarget::MergeIntoStdout => merged_stderr(stdout)?,
                    StderrTarget::Capture => Stdio::piped(),
                    StderrTarget::Inherit => Stdio::inherit(),
                    StderrTarget::Null => Stdio::null(),
                });
            }
        }

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        let writer = match (input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => {
                let payload = input.as_str().to_owned();
                trace!("Feeding {} bytes to {}", payload.len(), self.name);
                Some(thread::spawn(move || stdin.write_all(payload.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The tool may exit without reading all of its input.
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(ShellError::other("stdin writer thread panicked")),
            }
        }

        let status = output.status.code().unwrap_or(-1);

        let stdout = match (invocation.stdout, merged_sink) {
            (StdoutTarget::Capture, Some(mut sink)) => {
                let mut bytes = Vec::new();
                sink.seek(SeekFrom::Start(0))?;
                sink.read_to_end(&mut bytes)?;
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            (StdoutTarget::Capture, None) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            _ => None,
        };
        let stderr = match invocation.stderr {
            StderrTarget::Capture => Some(String::from_utf8_lossy(&output.stderr).into_owned()),
            _ => None,
        };

        debug!("{} exited with status {}", self.name, status);
        let mode = invocation.failure.unwrap_or(self.failure);
        check_failure(&self.name, status, mode, DEFAULT_FAILURE_MESSAGE)?;

        Ok(RunOutput {
            status,
            stdout,
            stderr,
        })
    }

    fn spawn_error(&self, err: io::Error) -> ShellError {
        if err.kind() == io::ErrorKind::NotFound {
            ShellError::tool_not_found(&self.name)
        } else {
            ShellError::Io(err)
        }
    }
}

/// Stderr routed wherever stdout goes when it is not captured
fn merged_stderr(stdout: StdoutTarget) -> Result<Stdio> {
    match stdout {
        StdoutTarget::Null => Ok(Stdio::null()),
        StdoutTarget::Capture => Ok(Stdio::piped()),
        StdoutTarget::Inherit => own_stdout(),
    }
}

#[cfg(unix)]
fn own_stdout() -> Result<Stdio> {
    use std::os::fd::AsFd;
    let fd = io::stdout().as_fd().try_clone_to_owned()?;
    Ok(Stdio::from(fd))
}

#[cfg(not(unix))]
fn own_stdout() -> Result<Stdio> {
    Ok(Stdio::inherit())
}
