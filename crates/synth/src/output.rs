//! Writing artifacts to disk
//!
//! Files whose contents already match are left untouched so that an
//! unchanged catalog does not churn modification times. Generated files from
//! earlier runs that this run no longer produces are reported as stale but
//! never deleted; removing them is left to whoever owns the directory.

use crate::emit::{Artifact, GENERATED_HEADER, STUB_EXTENSION};
use crate::error::{Result, SynthError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of writing one set of artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files created or overwritten
    pub written: Vec<PathBuf>,
    /// Files already holding the expected contents
    pub unchanged: Vec<PathBuf>,
    /// Generated files present in the directory but not produced this run
    pub stale: Vec<PathBuf>,
}

/// Write `artifacts` into `out_dir`, creating it if needed
///
/// # Errors
///
/// Returns [`SynthError::Write`] on the first I/O failure. Files written
/// before the failure stay in place; a rerun overwrites them.
pub fn write_artifacts(out_dir: &Path, artifacts: &[Artifact]) -> Result<WriteReport> {
    fs::create_dir_all(out_dir).map_err(|e| SynthError::write(out_dir, e))?;

    let mut report = WriteReport::default();
    for artifact in artifacts {
        let path = out_dir.join(&artifact.file_name);
        match fs::read(&path) {
            Ok(existing) if existing == artifact.contents.as_bytes() => {
                debug!(path = %path.display(), "unchanged");
                report.unchanged.push(path);
                continue;
            }
            _ => {}
        }
        fs::write(&path, &artifact.contents).map_err(|e| SynthError::write(&path, e))?;
        debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote");
        report.written.push(path);
    }

    let produced: HashSet<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    report.stale = find_stale(out_dir, &produced)?;
    for path in &report.stale {
        warn!(path = %path.display(), "stale generated file is no longer produced");
    }
    Ok(report)
}

fn find_stale(out_dir: &Path, produced: &HashSet<&str>) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(out_dir).map_err(|e| SynthError::write(out_dir, e))?;
    let mut stale = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SynthError::write(out_dir, e))?;
        let path = entry.path();
        let is_stub_file = path.extension().is_some_and(|ext| ext == STUB_EXTENSION);
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !is_stub_file || produced.contains(name.as_ref()) {
            continue;
        }
        if is_generated(&path) {
            stale.push(path);
        }
    }
    stale.sort();
    Ok(stale)
}

fn is_generated(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|text| text.lines().next() == Some(GENERATED_HEADER))
        .unwrap_or(false)
}
