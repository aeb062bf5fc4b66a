use image::imageops::crop_imm;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{RankedRegion, Rect};

pub const CROP_JPEG_QUALITY: u8 = 95;

const OVERLAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

pub fn write_rgb_jpeg(output: &Path, cols: u32, rows: u32, rgb_data: &[u8]) -> Result<()> {
    let (cols, rows) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            return Err(Error::Processing(format!(
                "{}x{} exceeds JPEG dimension limits",
                cols, rows
            )));
        }
    };
    let file = File::create(output).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, CROP_JPEG_QUALITY);
    encoder.encode(rgb_data, cols, rows, ColorType::Rgb)?;
    writer.flush().map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Cut `rect` out of `image` and save it as a JPEG of exactly that size.
pub fn write_crop(image: &RgbImage, rect: &Rect, output: &Path) -> Result<()> {
    if !rect.fits_within(image.width(), image.height()) {
        return Err(Error::Processing(format!(
            "region {} lies outside the {}x{} image",
            rect,
            image.width(),
            image.height()
        )));
    }
    let crop = crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image();
    write_rgb_jpeg(output, crop.width(), crop.height(), crop.as_raw())
}

/// Save `image` with the outline of every kept region drawn on top.
pub fn write_overlay(image: &RgbImage, regions: &[RankedRegion], output: &Path) -> Result<()> {
    let mut canvas = image.clone();
    for region in regions {
        let r = region.rect;
        draw_hollow_rect_mut(
            &mut canvas,
            imageproc::rect::Rect::at(r.x as i32, r.y as i32).of_size(r.width, r.height),
            OVERLAY_COLOR,
        );
    }
    write_rgb_jpeg(output, canvas.width(), canvas.height(), canvas.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_has_rect_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let img = RgbImage::from_fn(60, 40, |x, y| image::Rgb([x as u8 * 4, y as u8 * 6, 90]));
        let out = tmp.path().join("crop.jpg");
        write_crop(&img, &Rect::new(5, 7, 31, 17), &out).unwrap();

        let decoded = image::open(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (31, 17));
    }

    #[test]
    fn rejects_out_of_bounds_rect() {
        let tmp = tempfile::tempdir().unwrap();
        let img = RgbImage::new(10, 10);
        let err = write_crop(&img, &Rect::new(5, 5, 6, 2), &tmp.path().join("x.jpg"));
        assert!(err.is_err());
    }

    #[test]
    fn written_jpeg_is_complete_on_return() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("solid.jpg");
        let img = RgbImage::from_pixel(64, 48, image::Rgb([200, 10, 10]));
        write_rgb_jpeg(&out, 64, 48, img.as_raw()).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn unwritable_jpeg_path_is_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let img = RgbImage::new(4, 4);
        let err = write_rgb_jpeg(&tmp.path().join("no/such/dir.jpg"), 4, 4, img.as_raw());
        assert!(matches!(err, Err(Error::Write { .. })));
    }

    #[test]
    fn overlay_outlines_kept_regions() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("overlay.jpg");
        let img = RgbImage::from_pixel(80, 60, image::Rgb([0, 0, 0]));
        let regions = [RankedRegion {
            rank: 1,
            rect: Rect::new(10, 10, 40, 30),
        }];
        write_overlay(&img, &regions, &out).unwrap();

        let decoded = image::open(&out).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (80, 60));
        assert!(decoded.get_pixel(10, 20)[1] > 80);
        assert!(decoded.get_pixel(30, 25)[1] < 40);
    }
}
