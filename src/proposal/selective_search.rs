use image::RgbImage;
use opencv::core::{self, Mat, Scalar, Vector};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::ximgproc;

use super::RegionProposer;
use crate::error::{Error, Result};
use crate::types::{Rect, SearchMode};

/// OpenCV ximgproc selective search.
///
/// A fresh segmentation object is created per call, so one proposer can be
/// shared by every worker thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectiveSearchProposer {
    pub base_k: i32,
    pub inc_k: i32,
    pub sigma: f32,
}

impl Default for SelectiveSearchProposer {
    fn default() -> Self {
        Self {
            base_k: 150,
            inc_k: 150,
            sigma: 0.8,
        }
    }
}

fn to_bgr_mat(image: &RgbImage) -> opencv::Result<Mat> {
    let (width, height) = image.dimensions();
    let mut rgb = Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(image.as_raw());
    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

impl SelectiveSearchProposer {
    fn search(&self, image: &RgbImage, mode: SearchMode) -> opencv::Result<Vector<core::Rect>> {
        let bgr = to_bgr_mat(image)?;
        let mut ss = ximgproc::create_selective_search_segmentation()?;
        ss.set_base_image(&bgr)?;
        match mode {
            SearchMode::Fast => {
                ss.switch_to_selective_search_fast(self.base_k, self.inc_k, self.sigma)?
            }
            SearchMode::Quality => {
                ss.switch_to_selective_search_quality(self.base_k, self.inc_k, self.sigma)?
            }
        }
        let mut rects = Vector::<core::Rect>::new();
        ss.process(&mut rects)?;
        Ok(rects)
    }
}

impl RegionProposer for SelectiveSearchProposer {
    fn propose(&self, image: &RgbImage, mode: SearchMode) -> Result<Vec<Rect>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }
        let rects = self.search(image, mode).map_err(Error::external)?;
        Ok(rects
            .iter()
            .filter(|r| r.x >= 0 && r.y >= 0 && r.width > 0 && r.height > 0)
            .map(|r| Rect::new(r.x as u32, r.y as u32, r.width as u32, r.height as u32))
            .filter(|r| r.fits_within(width, height))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn proposes_in_bounds_regions() {
        let img = RgbImage::from_fn(120, 80, |x, y| {
            if x > 30 && x < 90 && y > 20 && y < 60 { Rgb([220, 30, 30]) } else { Rgb([20, 20, 120]) }
        });
        let regions = SelectiveSearchProposer::default()
            .propose(&img, SearchMode::Fast)
            .unwrap();
        assert!(!regions.is_empty());
        assert!(regions.iter().all(|r| r.fits_within(120, 80)));
    }
}
