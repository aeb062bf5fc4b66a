#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use regionpro::{Rect, RegionProposer, SearchMode};

/// Proposer returning a fixed list, clipped to the image it is given.
pub struct StubProposer(pub Vec<Rect>);

impl RegionProposer for StubProposer {
    fn propose(&self, image: &RgbImage, _mode: SearchMode) -> regionpro::Result<Vec<Rect>> {
        Ok(self
            .0
            .iter()
            .copied()
            .filter(|r| r.fits_within(image.width(), image.height()))
            .collect())
    }
}

pub fn stub() -> StubProposer {
    StubProposer(vec![
        Rect::new(0, 0, 50, 50),
        Rect::new(0, 0, 300, 120),
        Rect::new(100, 50, 400, 200),
        Rect::new(10, 10, 200, 100),
        Rect::new(20, 0, 580, 300),
        Rect::new(0, 0, 600, 300),
    ])
}

/// A landscape image with a bright block so real proposers have something to find.
pub fn write_scene(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_fn(width, height, |x, y| {
        if x > width / 4 && x < width * 3 / 4 && y > height / 4 && y < height * 3 / 4 {
            Rgb([230, 40, 40])
        } else if x < width / 2 {
            Rgb([20, 20, 120])
        } else {
            Rgb([20, 140, 20])
        }
    })
    .save(path)
    .unwrap();
}

pub fn write_manifest(path: &Path, lines: &[&str]) {
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(path, body).unwrap();
}

/// Proposer that always returns the whole image.
pub struct FullImageProposer;

impl RegionProposer for FullImageProposer {
    fn propose(&self, image: &RgbImage, _mode: SearchMode) -> regionpro::Result<Vec<Rect>> {
        Ok(vec![Rect::new(0, 0, image.width(), image.height())])
    }
}
