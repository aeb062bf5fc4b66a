//! Line-oriented text encodings of one image's selection.
//!
//! Both dialects start with the same three header lines:
//!
//! ```text
//! Image size: <width>,<height>
//! <duration>ms
//! x1,y1,x2,y2
//! ```
//!
//! The coordinate dialect then lists `x1,y1,x2,y2` per region; the crop
//! dialect lists `<id>\t<id>#<rank>\t<x1,y1,x2,y2>\t<crop path>`.
use std::io::Write;
use std::path::PathBuf;

use crate::types::RankedRegion;

pub const COLUMN_HEADER: &str = "x1,y1,x2,y2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalHeader {
    pub width: u32,
    pub height: u32,
    pub duration_ms: u128,
}

/// A kept region together with the crop file written for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRecord {
    pub region: RankedRegion,
    pub crop_path: PathBuf,
}

pub fn write_header<W: Write>(out: &mut W, header: &ProposalHeader) -> std::io::Result<()> {
    writeln!(out, "Image size: {},{}", header.width, header.height)?;
    writeln!(out, "{}ms", header.duration_ms)?;
    writeln!(out, "{}", COLUMN_HEADER)
}

pub fn write_coordinate_list<W: Write>(
    out: &mut W,
    header: &ProposalHeader,
    selection: &[RankedRegion],
) -> std::io::Result<()> {
    write_header(out, header)?;
    for region in selection {
        writeln!(out, "{}", region.rect)?;
    }
    Ok(())
}

pub fn write_crop_manifest<W: Write>(
    out: &mut W,
    header: &ProposalHeader,
    image_id: &str,
    records: &[CropRecord],
) -> std::io::Result<()> {
    write_header(out, header)?;
    for record in records {
        writeln!(
            out,
            "{id}\t{id}#{rank}\t{rect}\t{path}",
            id = image_id,
            rank = record.region.rank,
            rect = record.region.rect,
            path = record.crop_path.display()
        )?;
    }
    Ok(())
}
