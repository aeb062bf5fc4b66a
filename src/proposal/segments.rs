use std::collections::HashSet;

use image::{ImageBuffer, Luma, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::region_labelling::{Connectivity, connected_components};
use tracing::debug;

use super::RegionProposer;
use crate::error::Result;
use crate::types::{Rect, SearchMode};

/// One segmentation pass: smooth with `sigma`, then split each channel into `levels` bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStrategy {
    pub sigma: f32,
    pub levels: u32,
}

const FAST_STRATEGIES: &[SegmentStrategy] = &[
    SegmentStrategy { sigma: 0.8, levels: 4 },
    SegmentStrategy { sigma: 1.6, levels: 3 },
    SegmentStrategy { sigma: 3.0, levels: 2 },
];

const QUALITY_STRATEGIES: &[SegmentStrategy] = &[
    SegmentStrategy { sigma: 0.5, levels: 6 },
    SegmentStrategy { sigma: 0.8, levels: 5 },
    SegmentStrategy { sigma: 1.2, levels: 4 },
    SegmentStrategy { sigma: 1.6, levels: 3 },
    SegmentStrategy { sigma: 2.4, levels: 3 },
    SegmentStrategy { sigma: 3.0, levels: 2 },
    SegmentStrategy { sigma: 4.0, levels: 2 },
];

const BACKGROUND: Luma<u32> = Luma([u32::MAX]);

/// Multi-scale colour-segment proposer built on `imageproc`.
///
/// Every strategy of the selected mode yields the bounding boxes of its
/// connected colour segments in label (scan) order. Boxes already emitted by
/// an earlier strategy are skipped, and the whole image is appended last.
#[derive(Debug, Clone)]
pub struct SegmentProposer {
    /// Segments with fewer pixels than this are ignored
    pub min_component_pixels: u32,
}

impl Default for SegmentProposer {
    fn default() -> Self {
        Self {
            min_component_pixels: 16,
        }
    }
}

impl SegmentProposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategies(mode: SearchMode) -> &'static [SegmentStrategy] {
        match mode {
            SearchMode::Fast => FAST_STRATEGIES,
            SearchMode::Quality => QUALITY_STRATEGIES,
        }
    }

    fn segment_boxes(&self, image: &RgbImage, strategy: SegmentStrategy) -> Vec<Rect> {
        let smoothed = gaussian_blur_f32(image, strategy.sigma);
        let codes = quantize(&smoothed, strategy.levels);
        let labels = connected_components(&codes, Connectivity::Eight, BACKGROUND);

        let mut bounds: Vec<Option<SegmentBounds>> = Vec::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let label = label[0] as usize;
            if label == 0 {
                continue;
            }
            if bounds.len() <= label {
                bounds.resize(label + 1, None);
            }
            if let Some(b) = bounds[label].as_mut() {
                b.include(x, y);
            } else {
                bounds[label] = Some(SegmentBounds::at(x, y));
            }
        }

        bounds
            .into_iter()
            .flatten()
            .filter(|b| b.pixels >= self.min_component_pixels)
            .map(|b| b.rect())
            .collect()
    }
}

impl RegionProposer for SegmentProposer {
    fn propose(&self, image: &RgbImage, mode: SearchMode) -> Result<Vec<Rect>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut regions = Vec::new();
        for strategy in Self::strategies(mode) {
            let boxes = self.segment_boxes(image, *strategy);
            debug!(
                "sigma={} levels={} -> {} segments",
                strategy.sigma,
                strategy.levels,
                boxes.len()
            );
            for rect in boxes {
                if seen.insert(rect) {
                    regions.push(rect);
                }
            }
        }

        let full = Rect::new(0, 0, width, height);
        if seen.insert(full) {
            regions.push(full);
        }
        Ok(regions)
    }
}

fn quantize(image: &RgbImage, levels: u32) -> ImageBuffer<Luma<u32>, Vec<u32>> {
    let levels = levels.max(1);
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let bin = |c: u8| c as u32 * levels / 256;
        Luma([(bin(r) * levels + bin(g)) * levels + bin(b)])
    })
}

#[derive(Debug, Clone, Copy)]
struct SegmentBounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    pixels: u32,
}

impl SegmentBounds {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            pixels: 1,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixels += 1;
    }

    fn rect(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn two_tone() -> RgbImage {
        // left half black, right half white
        RgbImage::from_fn(120, 60, |x, _| {
            if x < 60 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        })
    }

    #[test]
    fn finds_both_halves_and_full_image() {
        let regions = SegmentProposer::new().propose(&two_tone(), SearchMode::Fast).unwrap();
        assert!(regions.contains(&Rect::new(0, 0, 120, 60)));
        assert_eq!(regions.last(), Some(&Rect::new(0, 0, 120, 60)));
        assert!(regions.iter().any(|r| r.x == 0 && r.width >= 55 && r.width <= 65 && r.height == 60));
        assert!(regions.iter().any(|r| r.x2() == 120 && r.width >= 55 && r.width <= 65));
    }

    #[test]
    fn regions_are_unique_and_in_bounds() {
        let img = RgbImage::from_fn(90, 70, |x, y| Rgb([(x * 3) as u8, (y * 3) as u8, 128]));
        for mode in [SearchMode::Fast, SearchMode::Quality] {
            let regions = SegmentProposer::new().propose(&img, mode).unwrap();
            let unique: HashSet<_> = regions.iter().collect();
            assert_eq!(unique.len(), regions.len());
            assert!(regions.iter().all(|r| r.fits_within(90, 70)));
        }
    }

    #[test]
    fn deterministic_for_same_input() {
        let img = two_tone();
        let p = SegmentProposer::new();
        assert_eq!(
            p.propose(&img, SearchMode::Quality).unwrap(),
            p.propose(&img, SearchMode::Quality).unwrap()
        );
    }

    #[test]
    fn uniform_image_yields_single_region() {
        let img = RgbImage::from_pixel(40, 30, Rgb([7, 7, 7]));
        assert_eq!(
            SegmentProposer::new().propose(&img, SearchMode::Fast).unwrap(),
            vec![Rect::new(0, 0, 40, 30)]
        );
    }
}
