use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbImage;
use tracing::{info, warn};

use crate::core::params::RunConfig;
use crate::core::processing::resize::normalize_image;
use crate::core::processing::select::select_regions;
use crate::error::{Error, Result};
use crate::io::manifest::ManifestEntry;
use crate::io::paths::{
    crop_output_path, ensure_parent_dir, overlay_output_path, text_output_path,
};
use crate::io::writers::{
    CropRecord, ProposalHeader, write_coordinate_list, write_crop, write_crop_manifest,
    write_overlay,
};
use crate::proposal::RegionProposer;
use crate::types::OutputDialect;

/// What happened to one manifest entry that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Processed {
        /// Candidates returned by the proposer
        proposals: usize,
        /// Regions written after filtering and truncation
        kept: usize,
        duration_ms: u128,
        output: PathBuf,
    },
    Skipped {
        reason: String,
    },
}

/// Decode an image file into 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

fn write_text_file<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let to_write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer).map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)
}

/// Run decode, normalize, propose, select and write for one manifest entry.
///
/// Undecodable images are reported as [`EntryOutcome::Skipped`]; write
/// failures are returned as errors local to this entry.
pub fn process_entry(
    entry: &ManifestEntry,
    config: &RunConfig,
    proposer: &dyn RegionProposer,
) -> Result<EntryOutcome> {
    let params = &config.params;
    let image_path = entry.resolve(config.base_image_dir.as_deref());

    let image = match load_image(&image_path) {
        Ok(img) if img.width() > 0 && img.height() > 0 => img,
        Ok(_) => {
            warn!("Empty image: {:?}", image_path);
            return Ok(EntryOutcome::Skipped {
                reason: "empty image".to_string(),
            });
        }
        Err(e @ Error::Decode { .. }) => {
            warn!("Empty image: {:?} ({})", image_path, e);
            return Ok(EntryOutcome::Skipped {
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let normalized = normalize_image(&image)?;
    drop(image);
    let (width, height) = normalized.dimensions();

    info!("Calculating regions for image: {:?}", image_path);
    let start = Instant::now();
    let mut regions = proposer.propose(&normalized, params.mode)?;
    let duration_ms = start.elapsed().as_millis();
    info!(
        "Total number of region proposals: {} in {} ms",
        regions.len(),
        duration_ms
    );
    if let Some(budget) = params.oracle_budget_ms {
        if duration_ms > budget as u128 {
            warn!(
                "Region proposal for {:?} took {} ms, over the {} ms budget",
                image_path, duration_ms, budget
            );
        }
    }

    let proposals = regions.len();
    regions.retain(|r| r.fits_within(width, height));
    if regions.len() < proposals {
        warn!(
            "Dropped {} proposals outside the {}x{} image",
            proposals - regions.len(),
            width,
            height
        );
    }

    let selection = select_regions(&regions, width, height, &params.selection());
    drop(regions);

    let header = ProposalHeader {
        width,
        height,
        duration_ms,
    };
    let output = text_output_path(&config.output_dir, &entry.path);
    ensure_parent_dir(&output)?;

    info!("Writing output: {:?}", output);
    match params.dialect {
        OutputDialect::Coordinates => {
            write_text_file(&output, |w| write_coordinate_list(w, &header, &selection))?;
        }
        OutputDialect::Crops => {
            let mut records = Vec::with_capacity(selection.len());
            for region in &selection {
                let crop_path = crop_output_path(&config.output_dir, &entry.id, region.rank);
                ensure_parent_dir(&crop_path)?;
                write_crop(&normalized, &region.rect, &crop_path)?;
                records.push(CropRecord {
                    region: *region,
                    crop_path,
                });
            }
            write_text_file(&output, |w| {
                write_crop_manifest(w, &header, &entry.id, &records)
            })?;
        }
    }

    if params.overlay {
        let overlay = overlay_output_path(&config.output_dir, &entry.path);
        write_overlay(&normalized, &selection, &overlay)?;
    }

    info!("Finished image: {}", entry.path);
    Ok(EntryOutcome::Processed {
        proposals,
        kept: selection.len(),
        duration_ms,
        output,
    })
}
