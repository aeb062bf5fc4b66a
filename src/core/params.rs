use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{OutputDialect, SearchMode, SizeCriterion};

/// Processing parameters suitable for JSON presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Maximum number of regions kept per image
    pub number_regions: usize,
    /// Minimum region size as a fraction of the image's reference metric
    pub min_fraction: f64,
    /// Whether `min_fraction` applies to area or width
    pub criterion: SizeCriterion,
    pub mode: SearchMode,
    pub dialect: OutputDialect,
    /// Worker threads; entries are processed in parallel across them
    pub threads: usize,
    /// Log a warning when one proposer call takes longer than this
    pub oracle_budget_ms: Option<u64>,
    /// Also save the normalized image with the kept regions outlined
    pub overlay: bool,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            number_regions: 100,
            min_fraction: 0.2,
            criterion: SizeCriterion::Area,
            mode: SearchMode::Quality,
            dialect: OutputDialect::Coordinates,
            threads: default_threads(),
            oracle_budget_ms: None,
            overlay: false,
        }
    }
}

impl ProcessingParams {
    pub fn validate(&self) -> Result<()> {
        if !self.min_fraction.is_finite() || self.min_fraction < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "min_fraction",
                value: self.min_fraction.to_string(),
            });
        }
        if self.threads == 0 {
            return Err(Error::InvalidArgument {
                arg: "threads",
                value: self.threads.to_string(),
            });
        }
        Ok(())
    }

    pub fn selection(&self) -> SelectionParams {
        SelectionParams {
            number_regions: self.number_regions,
            min_fraction: self.min_fraction,
            criterion: self.criterion,
        }
    }
}

/// The subset of parameters the filter & selector consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    pub number_regions: usize,
    pub min_fraction: f64,
    pub criterion: SizeCriterion,
}

/// Everything one batch run needs. Built once, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub manifest: PathBuf,
    pub base_image_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub params: ProcessingParams,
}

impl RunConfig {
    pub fn new(manifest: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            base_image_dir: None,
            output_dir: output_dir.into(),
            params: ProcessingParams::default(),
        }
    }

    pub fn with_base_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_image_dir = Some(dir.into());
        self
    }

    pub fn with_params(mut self, params: ProcessingParams) -> Self {
        self.params = params;
        self
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
