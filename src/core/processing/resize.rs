use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::debug;

use crate::error::{Error, Result};

/// Cap applied to the longer side of the normalized image.
pub const LONG_SIDE_CAP: u32 = 600;
/// Cap applied to the shorter side of the normalized image.
pub const SHORT_SIDE_CAP: u32 = 450;

/// Target dimensions inside the 600x450 envelope, with truncating integer math.
///
/// Landscape images (`width > height`) scale the width to 600; everything
/// else, square images included, scales the height to 600. The other side
/// follows proportionally and is clamped to 450, in which case the long side
/// is recomputed from the clamp.
pub fn calculate_envelope_dimensions(width: u32, height: u32) -> (u32, u32) {
    let (w, h) = (width as u64, height as u64);
    let long = LONG_SIDE_CAP as u64;
    let short = SHORT_SIDE_CAP as u64;

    let (new_w, new_h) = if w > h {
        let mut new_w = long;
        let mut new_h = h * new_w / w;
        if new_h > short {
            new_h = short;
            new_w = w * new_h / h;
        }
        (new_w, new_h)
    } else {
        let mut new_h = long;
        let mut new_w = w * new_h / h;
        if new_w > short {
            new_w = short;
            new_h = h * new_w / w;
        }
        (new_w, new_h)
    };

    (new_w.max(1) as u32, new_h.max(1) as u32)
}

pub fn resize_rgb_image(
    data: &[u8],
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
) -> Result<Vec<u8>> {
    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols,
        original_rows,
        data.to_vec(),
        PixelType::U8x3,
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    Ok(dst_image.into_vec())
}

/// Rescale a decoded image into the envelope.
pub fn normalize_image(image: &RgbImage) -> Result<RgbImage> {
    let (cols, rows) = image.dimensions();
    if cols == 0 || rows == 0 {
        return Err(Error::Processing(format!(
            "cannot normalize an empty image ({}x{})",
            cols, rows
        )));
    }

    let (new_cols, new_rows) = calculate_envelope_dimensions(cols, rows);
    if (new_cols, new_rows) == (cols, rows) {
        return Ok(image.clone());
    }

    debug!(
        "Original size: {}x{}, New size: {}x{}",
        cols, rows, new_cols, new_rows
    );

    let resized = resize_rgb_image(image.as_raw(), cols, rows, new_cols, new_rows)?;
    RgbImage::from_raw(new_cols, new_rows, resized).ok_or_else(|| {
        Error::Processing(format!(
            "resized buffer does not match {}x{}",
            new_cols, new_rows
        ))
    })
}
