//! Region proposers: the pluggable source of candidate rectangles.
//!
//! The batch pipeline only depends on [`RegionProposer`]. With the `opencv`
//! feature, [`SelectiveSearchProposer`] binds OpenCV's ximgproc selective
//! search. The always-available [`SegmentProposer`] derives candidates from
//! multi-scale colour segments and is the fallback when OpenCV is not built.
use image::RgbImage;

use crate::error::Result;
use crate::types::{Rect, SearchMode};

pub mod segments;
pub use segments::SegmentProposer;

#[cfg(feature = "opencv")]
pub mod selective_search;
#[cfg(feature = "opencv")]
pub use selective_search::SelectiveSearchProposer;

/// Produces candidate object regions for a normalized image.
///
/// Implementations must be deterministic for identical input and mode, and
/// every returned rectangle must have positive size and lie inside the image.
/// The order of the returned rectangles is the emission order the selector
/// ranks by; it does not need to reflect any quality score. An `Err` fails
/// only the entry being processed.
pub trait RegionProposer: Send + Sync {
    fn propose(&self, image: &RgbImage, mode: SearchMode) -> Result<Vec<Rect>>;
}

impl<P: RegionProposer + ?Sized> RegionProposer for &P {
    fn propose(&self, image: &RgbImage, mode: SearchMode) -> Result<Vec<Rect>> {
        (**self).propose(image, mode)
    }
}

impl<P: RegionProposer + ?Sized> RegionProposer for Box<P> {
    fn propose(&self, image: &RgbImage, mode: SearchMode) -> Result<Vec<Rect>> {
        (**self).propose(image, mode)
    }
}

/// The proposer the CLI uses: selective search when OpenCV is built in.
#[cfg(feature = "opencv")]
pub fn default_proposer() -> Box<dyn RegionProposer> {
    Box::new(SelectiveSearchProposer::default())
}

/// The proposer the CLI uses: selective search when OpenCV is built in.
#[cfg(not(feature = "opencv"))]
pub fn default_proposer() -> Box<dyn RegionProposer> {
    Box::new(SegmentProposer::new())
}
