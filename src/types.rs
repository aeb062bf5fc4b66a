//! Shared types and enums used across regionpro.
//! Includes `SearchMode`, `SizeCriterion`, `OutputDialect`, the `Rect`
//! geometry type and the ranked `RankedRegion` produced by selection.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Latency/recall trade-off requested from the region proposer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Fast,
    Quality,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Fast => write!(f, "Fast"),
            SearchMode::Quality => write!(f, "Quality"),
        }
    }
}

/// Reference metric the minimum-size threshold is a fraction of.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCriterion {
    /// Region area compared against a fraction of the image area
    Area,
    /// Region width compared against a fraction of the image width
    Width,
}

impl std::fmt::Display for SizeCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeCriterion::Area => write!(f, "Area"),
            SizeCriterion::Width => write!(f, "Width"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDialect {
    /// One `x1,y1,x2,y2` line per region
    Coordinates,
    /// Tab-separated crop manifest plus one JPEG per region
    Crops,
}

impl std::fmt::Display for OutputDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputDialect::Coordinates => write!(f, "Coordinates"),
            OutputDialect::Crops => write!(f, "Crops"),
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates of the normalized image.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x2(&self) -> u32 {
        self.x + self.width
    }

    pub fn y2(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Positive size and fully inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Corner form used by both output dialects.
impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.x2(), self.y2())
    }
}

/// A kept region and its 1-based rank within one image's selection.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RankedRegion {
    pub rank: usize,
    pub rect: Rect,
}
