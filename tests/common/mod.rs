// file: tests/common/mod.rs
// version: 1.0.0
// guid: f3ad439e-a452-47dc-acfc-97e150a415a8

//! Stand-in GROMACS tools for integration tests
//!
//! All scripts are written once, before any test spawns a process, so no
//! child can inherit a script's open write handle.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

const TOOLS: &[(&str, &str)] = &[
    (
        "g_fake",
        r#"if [ "$1" = "-h" ]; then
  echo "                         :-)  G  R  O  M  A  C  S  (-:"
  echo ""
  echo "DESCRIPTION"
  echo "-----------"
  echo "g_fake pretends to analyse a trajectory."
  exit 0
fi
for a in "$@"; do echo "ARG:$a"; done"#,
    ),
    ("g_nodoc", r#"echo "usage: g_nodoc [options]""#),
    ("g_fail", "echo \"out line\"\necho \"err line\" >&2\nexit 1"),
    ("g_both", "echo \"to-stdout\"\necho \"to-stderr\" >&2"),
    ("g_cat", "cat"),
    ("g_counter", r#"echo run >> "$COUNTER""#),
    (
        "grompp",
        r#"echo "checking input for internal consistency..."
echo "processing topology..." >&2
echo "System has non-zero total charge: -2.000000e+00"
echo """#,
    ),
    (
        "make_ndx",
        r#"read answer
echo "  0 System              : 33876 atoms"
echo "  1 Protein             :  1960 atoms"
echo " 13 SOL                 : 31836 atoms""#,
    ),
    (
        "trjconv",
        r#"echo "$@" > "$TRJ_LOG"
cat >> "$TRJ_LOG""#,
    ),
];

static TOOL_DIR: Lazy<TempDir> = Lazy::new(|| {
    let dir = tempfile::Builder::new()
        .prefix("gmxsh-tools")
        .tempdir()
        .expect("create tool dir");
    for (name, body) in TOOLS {
        write_tool(dir.path(), name, body);
    }
    dir
});

/// Write an executable `/bin/sh` script named `name` into `dir`
#[cfg(unix)]
pub fn write_tool(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write tool");
    let mut perms = fs::metadata(&path).expect("tool metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod tool");
}

/// Directory holding the stand-in tools
pub fn tool_dir() -> &'static Path {
    TOOL_DIR.path()
}

pub fn search_path() -> Vec<PathBuf> {
    vec![tool_dir().to_path_buf()]
}

/// Writer collecting everything logged while it is the default subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with warnings captured; returns its result and the log text
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
