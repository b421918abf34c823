// file: src/config.rs
// version: 1.0.0
// guid: 270a31da-4292-49bd-bd21-3d58a2d4749e

use crate::command::{FailureMode, Flags};
use crate::error::{Result, ShellError};
use crate::utils::system::SystemUtils;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".gromacs-shell.toml";

/// Shell configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    /// Extra environment for every tool process
    pub env: BTreeMap<String, String>,
    /// Tools to probe in addition to the built-in catalog
    pub extra_tools: Vec<String>,
    /// Per-tool defaults, keyed by tool name
    pub tools: BTreeMap<String, ToolConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub failure: FailureMode,
    /// Run each tool with `-h` while loading the registry
    pub scrape_docs: bool,
    /// Directories searched for tools instead of `PATH`
    pub gmxbin: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub defaults: Flags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            failure: FailureMode::Raise,
            scrape_docs: true,
            gmxbin: Vec::new(),
            working_directory: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl ShellConfig {
    /// Load configuration from multiple sources
    ///
    /// Later sources override earlier ones: defaults, user config, project
    /// config, `explicit`, then environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Value::try_from(Self::default())
            .map_err(|e| ShellError::config(format!("Failed to encode defaults: {}", e)))?;

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                info!("Loading user configuration from: {}", user_config.display());
                merge_values(&mut merged, Self::read_value(&user_config)?);
            }
        }

        let project_config = Path::new(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            info!(
                "Loading project configuration from: {}",
                project_config.display()
            );
            merge_values(&mut merged, Self::read_value(project_config)?);
        }

        if let Some(path) = explicit {
            info!("Loading configuration from: {}", path.display());
            merge_values(&mut merged, Self::read_value(path)?);
        }

        let config: Self = merged
            .try_into()
            .map_err(|e| ShellError::config(format!("Invalid configuration: {}", e)))?;
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok())?;

        debug!("Final configuration: {:#?}", config);
        Ok(config)
    }

    /// Load a single configuration file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut merged = toml::Value::try_from(Self::default())
            .map_err(|e| ShellError::config(format!("Failed to encode defaults: {}", e)))?;
        merge_values(&mut merged, Self::read_value(path)?);
        merged
            .try_into()
            .map_err(|e| ShellError::config(format!("Invalid configuration {}: {}", path.display(), e)))
    }

    /// Get the user configuration file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gromacs-shell").join("config.toml"))
    }

    /// Search path for tools; `None` means `PATH`
    pub fn search_path(&self) -> Option<&[PathBuf]> {
        if self.general.gmxbin.is_empty() {
            None
        } else {
            Some(&self.general.gmxbin)
        }
    }

    /// Tool names to probe: catalog first, then configured extras
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = crate::tools::catalog_names().map(str::to_string).collect();
        for extra in self.extra_tools.iter().chain(self.tools.keys()) {
            if !names.contains(extra) {
                names.push(extra.clone());
            }
        }
        names
    }

    fn read_value(path: &Path) -> Result<toml::Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            ShellError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = expand_env_vars(&content, |key| std::env::var(key).ok())?;

        toml::from_str(&expanded).map_err(|e| {
            ShellError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("GMXSHELL_FAILURE") {
            config.general.failure = mode.parse()?;
        }

        if let Some(level) = lookup("GMXSHELL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(no_docs) = lookup("GMXSHELL_NO_DOCS") {
            config.general.scrape_docs = !matches!(no_docs.trim(), "1" | "true" | "yes");
        }

        if let Some(gmxbin) = lookup("GMXBIN") {
            let dirs = SystemUtils::split_search_path(&gmxbin);
            if !dirs.is_empty() {
                config.general.gmxbin = dirs;
            }
        }

        Ok(config)
    }
}

/// Expand `${VAR}` references in configuration content
pub fn expand_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}")?;

    let mut missing_vars = Vec::new();
    let expanded = re.replace_all(content, |caps: &regex::Captures<'_>| {
        match lookup(&caps[1]) {
            Some(value) => value,
            None => {
                missing_vars.push(caps[1].to_string());
                caps[0].to_string()
            }
        }
    });

    if !missing_vars.is_empty() {
        return Err(ShellError::config(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(expanded.into_owned())
}

/// Recursively merge `overlay` into `base`; tables merge, other values replace
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FlagValue;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.general.failure, FailureMode::Raise);
        assert!(config.general.scrape_docs);
        assert!(config.search_path().is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_merges_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
failure = "warn"
gmxbin = ["/opt/gromacs/bin"]

[env]
GMXLIB = "/opt/gromacs/share/top"

[tools.grompp]
defaults = { maxwarn = 1, v = true }
doc = "Use maxwarn sparingly."
"#,
        )
        .unwrap();

        let config = ShellConfig::from_file(&path).unwrap();
        assert_eq!(config.general.failure, FailureMode::Warn);
        // untouched keys keep their defaults
        assert!(config.general.scrape_docs);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.search_path().unwrap(), &[PathBuf::from("/opt/gromacs/bin")]);
        assert_eq!(config.env["GMXLIB"], "/opt/gromacs/share/top");

        let grompp = &config.tools["grompp"];
        assert_eq!(grompp.defaults.get("maxwarn"), Some(&FlagValue::from("1")));
        assert_eq!(grompp.defaults.get("v"), Some(&FlagValue::On));
        assert_eq!(grompp.doc.as_deref(), Some("Use maxwarn sparingly."));
    }

    #[test]
    fn test_invalid_failure_mode_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nfailure = \"explode\"\n").unwrap();
        assert!(ShellConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GMXSHELL_FAILURE", "ignore"),
            ("GMXSHELL_LOG_LEVEL", "debug"),
            ("GMXSHELL_NO_DOCS", "1"),
            ("GMXBIN", "/a/bin:/b/bin"),
        ]
        .into_iter()
        .collect();

        let config = ShellConfig::apply_env_overrides(ShellConfig::default(), |k| {
            vars.get(k).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.general.failure, FailureMode::Ignore);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.general.scrape_docs);
        assert_eq!(config.general.gmxbin, vec![PathBuf::from("/a/bin"), PathBuf::from("/b/bin")]);
    }

    #[test]
    fn test_bad_env_failure_mode() {
        let result = ShellConfig::apply_env_overrides(ShellConfig::default(), |k| {
            (k == "GMXSHELL_FAILURE").then(|| "sometimes".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        let lookup = |k: &str| (k == "HOME").then(|| "/home/md".to_string());
        let expanded = expand_env_vars("gmxbin = [\"${HOME}/gromacs/bin\"]", lookup).unwrap();
        assert_eq!(expanded, "gmxbin = [\"/home/md/gromacs/bin\"]");

        let err = expand_env_vars("x = \"${NOPE}\"", lookup).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn test_tool_names_include_extras_once() {
        let mut config = ShellConfig::default();
        config.extra_tools = vec!["g_select".to_string(), "grompp".to_string()];
        config.tools.insert("g_custom".to_string(), ToolConfig::default());
        let names = config.tool_names();
        assert_eq!(names.iter().filter(|n| *n == "grompp").count(), 1);
        assert!(names.contains(&"g_select".to_string()));
        assert!(names.contains(&"g_custom".to_string()));
    }
}
