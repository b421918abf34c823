// file: src/command/flags.rs
// version: 1.0.0
// guid: bd759b82-b604-45e7-abc0-422beddceb79

//! Flag values and their command-line serialization
//!
//! GROMACS tools take single-dash flags. Boolean switches are written bare
//! (`-v`) and negated with a `no` prefix (`-nov`); options with parameters are
//! followed by one or more values (`-f md1.xtc md2.xtc`).

use crate::error::{Result, ShellError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value attached to a single flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFlag", into = "RawFlag")]
pub enum FlagValue {
    /// Bare switch, `-v`
    On,
    /// Negated switch, `-nov`
    Off,
    /// Flag followed by one value
    Single(String),
    /// Flag followed by each value in order
    Multi(Vec<String>),
}

impl FlagValue {
    /// Append the tokens for `flag` with this value to `args`
    fn write_args(&self, flag: &str, args: &mut Vec<String>) {
        match self {
            FlagValue::On => args.push(flag.to_string()),
            FlagValue::Off => args.push(negate_flag(flag)),
            FlagValue::Single(value) => {
                args.push(flag.to_string());
                args.push(value.clone());
            }
            FlagValue::Multi(values) => {
                args.push(flag.to_string());
                args.extend(values.iter().cloned());
            }
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        if value {
            FlagValue::On
        } else {
            FlagValue::Off
        }
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Single(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Single(value)
    }
}

impl From<&String> for FlagValue {
    fn from(value: &String) -> Self {
        FlagValue::Single(value.clone())
    }
}

macro_rules! scalar_flag_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FlagValue {
                fn from(value: $t) -> Self {
                    FlagValue::Single(value.to_string())
                }
            }
        )*
    };
}

scalar_flag_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

impl<T: fmt::Display> From<Vec<T>> for FlagValue {
    fn from(values: Vec<T>) -> Self {
        FlagValue::Multi(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display> From<&[T]> for FlagValue {
    fn from(values: &[T]) -> Self {
        FlagValue::Multi(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for FlagValue {
    fn from(values: [T; N]) -> Self {
        FlagValue::Multi(values.iter().map(ToString::to_string).collect())
    }
}

/// Untyped form used for config files and JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<RawScalar>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Bool(b) => write!(f, "{}", b),
            RawScalar::Int(i) => write!(f, "{}", i),
            RawScalar::Float(x) => write!(f, "{}", x),
            RawScalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<RawFlag> for FlagValue {
    fn from(raw: RawFlag) -> Self {
        match raw {
            RawFlag::Bool(b) => b.into(),
            RawFlag::Int(i) => i.into(),
            RawFlag::Float(x) => x.into(),
            RawFlag::Text(s) => s.into(),
            RawFlag::List(items) => items.into(),
        }
    }
}

impl From<FlagValue> for RawFlag {
    fn from(value: FlagValue) -> Self {
        match value {
            FlagValue::On => RawFlag::Bool(true),
            FlagValue::Off => RawFlag::Bool(false),
            FlagValue::Single(s) => RawFlag::Text(s),
            FlagValue::Multi(items) => RawFlag::List(items.into_iter().map(RawScalar::Text).collect()),
        }
    }
}

/// Prefix a flag name with a single dash unless it already has one
pub fn normalize_flag(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("-{}", name)
    }
}

/// Negated spelling of a switch: `-v` becomes `-nov`
///
/// The leading dashes are kept as written, so `--pbc` becomes `--nopbc`.
pub fn negate_flag(flag: &str) -> String {
    let flag = normalize_flag(flag);
    let bare = flag.trim_start_matches('-');
    let dashes = &flag[..flag.len() - bare.len()];
    format!("{}no{}", dashes, bare)
}

/// Ordered set of flags for one tool
///
/// Keys are stored normalized, so `v` and `-v` address the same flag.
/// Replacing an existing flag keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, FlagValue>",
    into = "IndexMap<String, FlagValue>"
)]
pub struct Flags {
    entries: IndexMap<String, FlagValue>,
}

impl From<IndexMap<String, FlagValue>> for Flags {
    fn from(raw: IndexMap<String, FlagValue>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Flags> for IndexMap<String, FlagValue> {
    fn from(flags: Flags) -> Self {
        flags.entries
    }
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional switch; same as setting it to `On`
    pub fn switch(mut self, name: &str) -> Self {
        self.insert(name, FlagValue::On);
        self
    }

    /// Set a flag, builder style
    pub fn set(mut self, name: &str, value: impl Into<FlagValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Set a flag in place, returning the previous value
    pub fn insert(&mut self, name: &str, value: FlagValue) -> Option<FlagValue> {
        self.entries.insert(normalize_flag(name), value)
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.entries.get(&normalize_flag(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `overrides` on top of these flags; overrides win
    pub fn merge(&mut self, overrides: &Flags) {
        for (flag, value) in &overrides.entries {
            self.entries.insert(flag.clone(), value.clone());
        }
    }

    /// Copy of these flags with `overrides` applied
    pub fn merged(&self, overrides: &Flags) -> Flags {
        let mut merged = self.clone();
        merged.merge(overrides);
        merged
    }

    /// Serialize to the argument vector handed to the process
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (flag, value) in &self.entries {
            value.write_args(flag, &mut args);
        }
        args
    }

    /// Parse `name`, `name=value` and `name=true|false` tokens
    ///
    /// Repeating `name=value` collects the values into a multi-valued flag.
    pub fn parse_cli<I, S>(tokens: I) -> Result<Flags>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Flags::new();
        for token in tokens {
            let token = token.as_ref();
            let (name, value) = match token.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (token, None),
            };
            if name.trim_start_matches('-').is_empty() {
                return Err(ShellError::invalid_argument(format!(
                    "flag without a name: '{}'",
                    token
                )));
            }

            let parsed = match value {
                None | Some("true") => FlagValue::On,
                Some("false") => FlagValue::Off,
                Some(v) => FlagValue::Single(v.to_string()),
            };

            let value = match (flags.get(name), parsed) {
                (Some(FlagValue::Single(first)), FlagValue::Single(next)) => {
                    FlagValue::Multi(vec![first.clone(), next])
                }
                (Some(FlagValue::Multi(values)), FlagValue::Single(next)) => {
                    let mut values = values.clone();
                    values.push(next);
                    FlagValue::Multi(values)
                }
                (_, parsed) => parsed,
            };
            flags.insert(name, value);
        }
        Ok(flags)
    }
}

impl<K: AsRef<str>, V: Into<FlagValue>> FromIterator<(K, V)> for Flags {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut flags = Flags::new();
        for (k, v) in iter {
            flags.insert(k.as_ref(), v.into());
        }
        flags
    }
}
