// file: src/cbook.rs
// version: 1.0.0
// guid: a44e2d94-cc5f-4d9a-8c38-87458e5b3627

//! Cookbook of common tool invocations
//!
//! Each recipe is an often-used combination of flags for one tool, plus the
//! parsing of the output where the recipe needs a value from it.

use crate::command::{FailureMode, Flags, Input, Invocation, RunOutput};
use crate::error::{Result, ShellError};
use crate::registry::Registry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};

static QTOT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"System has non-zero total charge: *(?P<qtot>[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?)")
        .expect("qtot pattern is valid")
});

static GROUP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?P<nr>\d+)\s+(?P<name>\S+)\s*:\s*(?P<natoms>\d+)\s+atoms")
        .expect("index group pattern is valid")
});

/// One index group as listed by `make_ndx`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup {
    pub nr: usize,
    pub name: String,
    pub natoms: usize,
}

/// Total charge reported in grompp output, if any
pub fn parse_qtot(output: &str) -> Option<f64> {
    let caps = QTOT_PATTERN.captures(output)?;
    caps["qtot"].parse().ok()
}

/// Index groups from the group table printed by `make_ndx`
pub fn parse_index_groups(output: &str) -> Vec<IndexGroup> {
    GROUP_PATTERN
        .captures_iter(output)
        .filter_map(|caps| {
            Some(IndexGroup {
                nr: caps["nr"].parse().ok()?,
                name: caps["name"].to_string(),
                natoms: caps["natoms"].parse().ok()?,
            })
        })
        .collect()
}

/// Run `grompp` and return the total charge of the system
///
/// A failing grompp is an error regardless of the command's failure mode;
/// its combined output is logged first.
pub fn grompp_qtot(registry: &Registry, flags: &Flags) -> Result<f64> {
    let grompp = registry.require("grompp")?;
    let output = grompp.run_with(flags, &Invocation::new().capture().failure(FailureMode::Ignore))?;

    if !output.success() {
        let msg = "grompp_qtot() failed. See warning and screen output for clues.";
        error!(
            "{}\n=========== grompp (stdout/stderr) ============\n{}\n===============================================",
            msg,
            output.stdout_text()
        );
        return Err(ShellError::tool_failed("grompp", output.status, msg));
    }

    let qtot = parse_qtot(output.stdout_text()).unwrap_or(0.0);
    debug!("grompp reports total charge {}", qtot);
    Ok(qtot)
}

/// Write a compact representation of the system, centred on the protein
///
/// `trjconv -ur compact -center -boxcenter tric -pbc mol`, answering the
/// group prompts with `protein` then `system`.
pub fn trj_compact(registry: &Registry, flags: &Flags) -> Result<RunOutput> {
    let trjconv = registry.require("trjconv")?;
    let preset = Flags::new()
        .set("ur", "compact")
        .switch("center")
        .set("boxcenter", "tric")
        .set("pbc", "mol")
        .merged(flags);
    trjconv.run_with(&preset, &Invocation::new().input(Input::lines(["protein", "system"])))
}

/// Fit the trajectory on the backbone (rotation and translation)
pub fn trj_fitted(registry: &Registry, flags: &Flags) -> Result<RunOutput> {
    let trjconv = registry.require("trjconv")?;
    let preset = Flags::new().set("fit", "rot+trans").merged(flags);
    trjconv.run_with(&preset, &Invocation::new().input(Input::lines(["backbone", "system"])))
}

/// List the index groups `make_ndx` offers for the given input
///
/// `make_ndx` is answered with `q` straight away, so no index file is
/// changed beyond what the flags ask for.
pub fn index_groups(registry: &Registry, flags: &Flags) -> Result<Vec<IndexGroup>> {
    let make_ndx = registry.require("make_ndx")?;
    let output = make_ndx.run_with(flags, &Invocation::new().capture().input(Input::lines(["q"])))?;
    Ok(parse_index_groups(output.stdout_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qtot() {
        let output = "\
checking input for internal consistency...
processing topology...
System has non-zero total charge: -2.000000e+00

";
        assert_eq!(parse_qtot(output), Some(-2.0));
        assert_eq!(parse_qtot("System has non-zero total charge: 1.5"), Some(1.5));
        assert_eq!(parse_qtot("nothing to see here"), None);
    }

    #[test]
    fn test_parse_index_groups() {
        let output = "\
Reading structure file
Group     0 (         System) has 33876 elements
  0 System              : 33876 atoms
  1 Protein             :  1960 atoms
 13 SOL                 : 31836 atoms

 nr : group       !   'name' nr name   'splitch' nr    Enter: list groups
";
        let groups = parse_index_groups(output);
        assert_eq!(
            groups,
            vec![
                IndexGroup { nr: 0, name: "System".into(), natoms: 33876 },
                IndexGroup { nr: 1, name: "Protein".into(), natoms: 1960 },
                IndexGroup { nr: 13, name: "SOL".into(), natoms: 31836 },
            ]
        );
    }

    #[test]
    fn test_recipes_need_their_tool() {
        let registry = Registry::default();
        assert!(grompp_qtot(&registry, &Flags::new()).unwrap_err().is_tool_not_found());
        assert!(trj_compact(&registry, &Flags::new()).unwrap_err().is_tool_not_found());
        assert!(index_groups(&registry, &Flags::new()).unwrap_err().is_tool_not_found());
    }
}
