//! Symmetry completion: keep one half of an image and mirror it onto the other.

use std::path::Path;
use std::str::FromStr;

use image::{imageops, DynamicImage, GenericImageView};

use crate::error::ShapeError;

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Keep the left half, mirror it to the right.
    Vertical,
    /// Keep the top half, mirror it downwards.
    Horizontal,
}

impl FromStr for Axis {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Axis::Vertical),
            "horizontal" => Ok(Axis::Horizontal),
            other => Err(ShapeError::InvalidAxis(other.to_string())),
        }
    }
}

/// Complete an image by mirroring one half across `axis`.
///
/// The kept half is `floor(extent / 2)` pixels, so odd extents lose
/// their middle row or column.
pub fn complete_image(img: &DynamicImage, axis: Axis) -> Result<DynamicImage, ShapeError> {
    let (w, h) = img.dimensions();
    let (half_w, half_h) = match axis {
        Axis::Vertical => (w / 2, h),
        Axis::Horizontal => (w, h / 2),
    };
    if half_w == 0 || half_h == 0 {
        return Err(ShapeError::Render(format!("{}x{} image is too small to mirror", w, h)));
    }

    let half = img.crop_imm(0, 0, half_w, half_h);
    let (mirrored, out_w, out_h, dx, dy) = match axis {
        Axis::Vertical => (half.fliph(), half_w * 2, h, half_w as i64, 0),
        Axis::Horizontal => (half.flipv(), w, half_h * 2, 0, half_h as i64),
    };

    let mut out = DynamicImage::new(out_w, out_h, img.color());
    imageops::replace(&mut out, &half, 0, 0);
    imageops::replace(&mut out, &mirrored, dx, dy);
    Ok(out)
}

/// Load, complete and save. The output format follows the output extension.
pub fn complete_file(input: &Path, output: &Path, axis: Axis) -> Result<(), ShapeError> {
    let img = image::open(input).map_err(|e| ShapeError::ImageLoad(e.to_string()))?;
    let completed = complete_image(&img, axis)?;
    completed
        .save(output)
        .map_err(|e| ShapeError::Render(e.to_string()))?;
    Ok(())
}
