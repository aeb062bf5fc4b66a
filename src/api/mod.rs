//! High-level, ergonomic library API: prepare the output root, process a
//! single manifest entry, or run a whole manifest on a bounded worker pool.
//! Prefer these entrypoints over the low-level processing modules.
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::RunConfig;
use crate::core::processing::pipeline::{EntryOutcome, process_entry};
use crate::error::{Error, Result};
use crate::io::manifest::{ManifestEntry, read_manifest};
use crate::proposal::RegionProposer;

/// Tally of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    fn record(&mut self, result: &Result<EntryOutcome>) {
        self.total += 1;
        match result {
            Ok(EntryOutcome::Processed { .. }) => self.processed += 1,
            Ok(EntryOutcome::Skipped { .. }) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Create the output root, or warn that existing files may be overwritten.
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        warn!(
            "Output directory {:?} exists. Files may be overwritten.",
            output_dir
        );
        return Ok(());
    }
    fs::create_dir_all(output_dir).map_err(|source| Error::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Process already-parsed entries in parallel with `config.params.threads` workers.
///
/// Per-entry failures are counted and logged; they never stop other entries.
pub fn process_entries(
    entries: &[ManifestEntry],
    config: &RunConfig,
    proposer: &dyn RegionProposer,
) -> Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.params.threads)
        .build()
        .map_err(Error::external)?;

    let results: Vec<Result<EntryOutcome>> = pool.install(|| {
        entries
            .par_iter()
            .map(|entry| {
                let result = process_entry(entry, config, proposer);
                if let Err(e) = &result {
                    warn!("Error processing {} (line {}): {}", entry.path, entry.line, e);
                }
                result
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for result in &results {
        report.record(result);
    }
    Ok(report)
}

/// Run a complete batch: validate parameters, prepare the output root, read
/// the manifest and process every entry.
///
/// Only configuration, manifest and output-root problems return `Err`.
pub fn run_batch(config: &RunConfig, proposer: &dyn RegionProposer) -> Result<BatchReport> {
    config.params.validate()?;
    prepare_output_dir(&config.output_dir)?;
    let entries = read_manifest(&config.manifest)?;

    info!(
        "Processing {} entries from {:?} with {} threads ({} mode, {} output)",
        entries.len(),
        config.manifest,
        config.params.threads,
        config.params.mode,
        config.params.dialect
    );

    let report = process_entries(&entries, config, proposer)?;

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.failed);
    Ok(report)
}
