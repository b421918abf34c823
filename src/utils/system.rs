// file: src/utils/system.rs
// version: 1.0.0
// guid: 429a6887-9a1b-4cf0-81d6-ce83a0df6283

//! System utility functions

use crate::error::{Result, ShellError};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Resolve a tool on `search_path`, or on `PATH` when none is given
pub fn locate_tool(name: &str, search_path: Option<&[PathBuf]>) -> Result<PathBuf> {
    SystemUtils::locate(name, search_path)
}

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Resolve a command to an executable path
    pub fn locate(name: &str, search_path: Option<&[PathBuf]>) -> Result<PathBuf> {
        let found = match search_path {
            Some(dirs) if !dirs.is_empty() => {
                let paths = std::env::join_paths(dirs).map_err(|e| {
                    ShellError::config(format!("Invalid search path entry: {}", e))
                })?;
                let cwd = std::env::current_dir()?;
                which::which_in(name, Some(paths), cwd)
            }
            _ => which::which(name),
        };

        found.map_err(|e| {
            debug!("Lookup of {} failed: {}", name, e);
            ShellError::tool_not_found(name)
        })
    }

    /// Search path from a `GMXBIN`-style value
    pub fn split_search_path(value: &str) -> Vec<PathBuf> {
        std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .inspect(|p| {
                if !p.is_absolute() {
                    warn!("Relative search path entry: {}", p.display());
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_on_path() {
        // Test with a command that should exist on most systems
        assert!(SystemUtils::locate("sh", None).is_ok());

        // Test with a command that shouldn't exist
        assert!(SystemUtils::locate("nonexistent-command-12345", None).is_err());
    }

    #[test]
    fn test_locate_reports_tool_name() {
        let err = locate_tool("nonexistent-command-12345", None).unwrap_err();
        assert!(err.is_tool_not_found());
        assert!(err.to_string().contains("nonexistent-command-12345"));
    }

    #[test]
    fn test_empty_search_path_falls_back_to_path() {
        assert!(SystemUtils::locate("sh", Some(&[])).is_ok());
    }

    #[test]
    fn test_split_search_path() {
        let dirs = SystemUtils::split_search_path("/opt/gromacs/bin::/usr/local/gromacs/bin");
        assert_eq!(
            dirs,
            vec![PathBuf::from("/opt/gromacs/bin"), PathBuf::from("/usr/local/gromacs/bin")]
        );
    }
}
