// file: src/registry.rs
// version: 1.0.0
// guid: c7d44300-eb97-4188-9006-780bc7477170

//! Registry of GROMACS tools found at startup
//!
//! Loading happens in two phases. First every declared tool is resolved on
//! the search path, which splits the catalog into available and missing tools
//! without running anything. Then, if enabled, each available tool is run
//! once with `-h` to cache its documentation; a failure there is recorded for
//! that tool and the scan carries on.

use crate::command::{FailureMode, GromacsCommand, GromacsCommandBuilder};
use crate::config::{ShellConfig, ToolConfig};
use crate::error::{Result, ShellError};
use crate::tools::ToolSpec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// State of the documentation scrape for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocStatus {
    /// Scraping was disabled or has not run
    Pending,
    Fetched,
    Failed(String),
}

/// An available tool and the outcome of its documentation scrape
#[derive(Debug)]
pub struct ToolEntry {
    pub command: GromacsCommand,
    pub doc_status: DocStatus,
}

/// Settings applied to every wrapper the registry builds
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    pub failure: FailureMode,
    pub search_path: Option<Vec<PathBuf>>,
    pub scrape_docs: bool,
    pub env: BTreeMap<String, String>,
    pub working_directory: Option<PathBuf>,
    pub tools: BTreeMap<String, ToolConfig>,
}

impl RegistryOptions {
    fn builder_for(&self, name: &str) -> GromacsCommandBuilder {
        let mut builder = GromacsCommand::builder(name)
            .failure(self.failure)
            .envs(self.env.clone());

        if let Some(ref dirs) = self.search_path {
            builder = builder.search_path(dirs.iter().cloned());
        }
        if let Some(ref dir) = self.working_directory {
            builder = builder.current_dir(dir);
        }
        if let Some(tool) = self.tools.get(name) {
            builder = builder.flags(&tool.defaults);
            if let Some(mode) = tool.failure {
                builder = builder.failure(mode);
            }
            if let Some(ref doc) = tool.doc {
                builder = builder.doc(doc.clone());
            }
        }
        builder
    }
}

impl From<&ShellConfig> for RegistryOptions {
    fn from(config: &ShellConfig) -> Self {
        Self {
            failure: config.general.failure,
            search_path: config.search_path().map(<[PathBuf]>::to_vec),
            scrape_docs: config.general.scrape_docs,
            env: config.env.clone(),
            working_directory: config.general.working_directory.clone(),
            tools: config.tools.clone(),
        }
    }
}

/// Serializable summary of a loaded registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryReport {
    pub available: Vec<String>,
    pub missing: Vec<String>,
    pub doc_failures: BTreeMap<String, String>,
}

/// Tools keyed by name, split into available and missing
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, ToolEntry>,
    missing: Vec<String>,
}

impl Registry {
    /// Probe the catalog plus configured tools
    pub fn load(config: &ShellConfig) -> Self {
        Self::from_names(config.tool_names(), &RegistryOptions::from(config))
    }

    /// Probe a fixed list of catalog entries
    pub fn from_catalog(specs: &[ToolSpec], options: &RegistryOptions) -> Self {
        Self::from_names(specs.iter().map(|spec| spec.name), options)
    }

    /// Probe the named tools
    pub fn from_names<I, S>(names: I, options: &RegistryOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Registry::default();

        for name in names {
            let name = name.as_ref();
            if registry.entries.contains_key(name) || registry.missing.iter().any(|m| m == name) {
                continue;
            }

            match options.builder_for(name).build() {
                Ok(command) => {
                    registry.entries.insert(
                        name.to_string(),
                        ToolEntry {
                            command,
                            doc_status: DocStatus::Pending,
                        },
                    );
                }
                Err(e) if e.is_tool_not_found() => {
                    debug!("{} not found", name);
                    registry.missing.push(name.to_string());
                }
                Err(e) => {
                    warn!("Could not set up {}: {}", name, e);
                    registry.missing.push(name.to_string());
                }
            }
        }

        if options.scrape_docs {
            registry.scrape_docs();
        }

        registry.missing.sort();
        info!(
            "Loaded {} Gromacs commands ({} missing)",
            registry.entries.len(),
            registry.missing.len()
        );
        if !registry.missing.is_empty() {
            warn!(
                "Some Gromacs commands were NOT found; maybe source GMXRC first? \
                 The following are missing:\n{:?}",
                registry.missing
            );
        }

        registry
    }

    /// Run the documentation scrape for every available tool still pending
    pub fn scrape_docs(&mut self) {
        for (name, entry) in self.entries.iter_mut() {
            if entry.doc_status != DocStatus::Pending {
                continue;
            }
            entry.doc_status = match entry.command.documentation() {
                Ok(_) => DocStatus::Fetched,
                Err(e) => {
                    debug!("No documentation for {}: {}", name, e);
                    DocStatus::Failed(e.to_string())
                }
            };
        }
    }

    pub fn get(&self, name: &str) -> Option<&GromacsCommand> {
        self.entries.get(name).map(|entry| &entry.command)
    }

    /// Like [`get`](Self::get), but a missing tool is an error
    pub fn require(&self, name: &str) -> Result<&GromacsCommand> {
        self.get(name).ok_or_else(|| ShellError::tool_not_found(name))
    }

    pub fn doc_status(&self, name: &str) -> Option<&DocStatus> {
        self.entries.get(name).map(|entry| &entry.doc_status)
    }

    /// Names of available tools, sorted
    pub fn available(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Names of tools that could not be found, sorted
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Tools whose documentation scrape failed, with the reason
    pub fn doc_failures(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| match entry.doc_status {
                DocStatus::Failed(ref reason) => Some((name.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ToolEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn report(&self) -> RegistryReport {
        RegistryReport {
            available: self.available().into_iter().map(str::to_string).collect(),
            missing: self.missing.clone(),
            doc_failures: self
                .doc_failures()
                .into_iter()
                .map(|(name, reason)| (name.to_string(), reason.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nowhere() -> RegistryOptions {
        RegistryOptions {
            search_path: Some(vec![std::env::temp_dir().join("gromacs-shell-empty-bin")]),
            ..RegistryOptions::default()
        }
    }

    #[test]
    fn test_missing_tools_recorded_once_and_sorted() {
        let registry = Registry::from_names(["g_rms", "grompp", "g_rms"], &nowhere());
        assert!(registry.is_empty());
        assert_eq!(registry.missing(), &["g_rms".to_string(), "grompp".to_string()]);
        assert!(registry.get("grompp").is_none());
    }

    #[test]
    fn test_require_missing_is_not_found() {
        let registry = Registry::from_names(["mdrun"], &nowhere());
        let err = registry.require("mdrun").unwrap_err();
        assert!(err.is_tool_not_found());
    }

    #[test]
    fn test_report_of_empty_registry() {
        let registry = Registry::from_names(["trjconv"], &nowhere());
        let report = registry.report();
        assert!(report.available.is_empty());
        assert_eq!(report.missing, vec!["trjconv"]);
        assert!(report.doc_failures.is_empty());
    }
}
