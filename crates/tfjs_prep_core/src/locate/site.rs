//! Search root discovery from a Python interpreter.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use tracing::{debug, warn};

use super::errors::{LocateError, LocateResult};
use crate::io::ProcessRunner;

/// Prints `{"global": [...], "user": "..."}` on stdout.
const SITE_QUERY: &str = "import json, site; \
print(json.dumps({'global': getattr(site, 'getsitepackages', lambda: [])(), \
'user': site.getusersitepackages()}))";

/// Package locations reported by an interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteLayout {
    /// Global site-packages, in the interpreter's order.
    #[serde(default)]
    pub global: Vec<PathBuf>,
    /// User-specific site-packages.
    #[serde(default)]
    pub user: Option<PathBuf>,
}

impl SiteLayout {
    /// Global roots first, user root last so a user install wins.
    pub fn into_roots(self) -> Vec<PathBuf> {
        let mut roots = self.global;
        if let Some(user) = self.user {
            roots.retain(|root| root != &user);
            roots.push(user);
        }
        roots
    }
}

/// Ask `python` where it installs packages.
pub fn query_interpreter(runner: &dyn ProcessRunner, python: &str) -> LocateResult<SiteLayout> {
    let args = vec!["-c".to_string(), SITE_QUERY.to_string()];
    let output = runner
        .run(python, &args)
        .map_err(|e| LocateError::interpreter_failed(python, e.to_string()))?;

    if !output.success() {
        return Err(LocateError::interpreter_failed(
            python,
            format!(
                "exit code {}: {}",
                output.exit_code.unwrap_or(-1),
                output.stderr.trim()
            ),
        ));
    }

    let answer = output
        .stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();

    serde_json::from_str(answer).map_err(|source| LocateError::InterpreterOutput {
        python: python.to_string(),
        source,
    })
}

/// Search roots from the interpreter, or from well-known directories if
/// the interpreter cannot answer.
pub fn discover_search_roots(runner: &dyn ProcessRunner, python: &str) -> Vec<PathBuf> {
    match query_interpreter(runner, python) {
        Ok(layout) => {
            debug!("{} reported site layout {:?}", python, layout);
            layout.into_roots()
        }
        Err(e) => {
            warn!("{}; scanning well-known locations instead", e);
            fallback_search_roots()
        }
    }
}

/// Site directories under the usual system prefixes, then the user prefix.
pub fn fallback_search_roots() -> Vec<PathBuf> {
    let mut lib_dirs = vec![PathBuf::from("/usr/lib"), PathBuf::from("/usr/local/lib")];
    if let Some(base) = BaseDirs::new() {
        lib_dirs.push(base.home_dir().join(".local").join("lib"));
    }

    lib_dirs.iter().flat_map(|dir| find_site_dirs(dir)).collect()
}

/// Find `python3*/site-packages` and `python3*/dist-packages` below `lib_dir`.
fn find_site_dirs(lib_dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = fs::read_dir(lib_dir) else {
        return found;
    };

    let mut version_dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("python3"))
        })
        .collect();
    version_dirs.sort();

    for dir in version_dirs {
        for leaf in ["dist-packages", "site-packages"] {
            let candidate = dir.join(leaf);
            if candidate.is_dir() {
                found.push(candidate);
            }
        }
    }
    found
}
