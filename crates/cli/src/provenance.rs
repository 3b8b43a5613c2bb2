//! Batch provenance: every results file gets a `<stem>.provenance.json`
//! naming the code, library version, settings and case counts behind it.

use anyhow::{Context, Result};
use georelate::RelateCfg;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Settings and tallies of one `batch` run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchRun {
    pub input: String,
    pub boundary_rule: String,
    pub max_coordinates: usize,
    pub cases: usize,
    pub failures: usize,
}

impl BatchRun {
    pub fn new(input: &str, cfg: &RelateCfg, cases: usize, failures: usize) -> Self {
        Self {
            input: input.to_string(),
            boundary_rule: format!("{:?}", cfg.boundary_rule),
            max_coordinates: cfg.max_coordinates,
            cases,
            failures,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub georelate: String,
    /// `file:line` of the writer's caller.
    pub callsite: String,
    pub run: BatchRun,
    pub results: String,
}

/// Write the sidecar next to `results` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(results: P, run: BatchRun) -> Result<PathBuf> {
    let results = results.as_ref();
    let path = provenance_path(results);
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        georelate: georelate::VERSION.to_string(),
        callsite: format!("{}:{}", caller.file(), caller.line()),
        run,
        results: results.to_string_lossy().into_owned(),
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(results: &Path) -> PathBuf {
    let mut name = results
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("results"));
    name.push(".provenance.json");
    results.with_file_name(name)
}

/// `GIT_COMMIT` at build or run time, else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
