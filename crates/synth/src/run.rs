//! One-shot synthesis run
//!
//! Load catalog → synthesize → render → write. This is everything the
//! `dynrpc-stubgen` binary does besides setting up logging.

use crate::config::StubgenConfig;
use crate::emit::render_artifacts;
use crate::error::Result;
use crate::output::{write_artifacts, WriteReport};
use crate::synthesize::synthesize;
use dynrpc_core::Catalog;
use std::path::Path;
use tracing::info;

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Stub type names in output order
    pub stubs: Vec<String>,
    /// What happened on disk
    pub write: WriteReport,
}

/// Run synthesis with paths resolved against `base_dir`
///
/// # Errors
///
/// Any [`SynthError`](crate::SynthError) aborts the run. Output written
/// before the failure is left for the next run to overwrite.
pub fn run(config: &StubgenConfig, base_dir: &Path) -> Result<RunReport> {
    let catalog_path = base_dir.join(&config.catalog);
    let out_dir = base_dir.join(&config.output_dir);

    info!(catalog = %catalog_path.display(), "loading contract catalog");
    let catalog = Catalog::from_file(&catalog_path)?;

    let descriptors = synthesize(&catalog, &config.synth_options())?;
    let artifacts = render_artifacts(&descriptors, &config.emit);
    let write = write_artifacts(&out_dir, &artifacts)?;

    let mut ordered: Vec<_> = descriptors.iter().collect();
    ordered.sort_by(|a, b| a.file_stem.cmp(&b.file_stem));
    let stubs: Vec<String> = ordered.iter().map(|d| d.type_name.clone()).collect();

    info!(
        contracts = catalog.contracts().len(),
        stubs = stubs.len(),
        written = write.written.len(),
        unchanged = write.unchanged.len(),
        stale = write.stale.len(),
        out_dir = %out_dir.display(),
        "stub synthesis complete"
    );
    Ok(RunReport { stubs, write })
}
