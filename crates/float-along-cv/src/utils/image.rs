//! Image loading and placement helpers using opencv-match conversions

use crate::Result;
use anyhow::Context;
use float_along_core::BBox;
use opencv::{
    core::{self, Mat, Scalar, Size},
    imgproc,
    prelude::*,
};
use opencv_match::prelude::*;
use std::path::Path;

/// Image utility functions leveraging opencv-match conversions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as color Mat (BGR) using opencv-match
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?
            .to_rgb8();

        img.try_into_cv()
            .context("Failed to convert image to OpenCV Mat")
    }

    /// Scale `image` onto `target` inside a black canvas of `canvas` size.
    ///
    /// Parts of the target outside the canvas are cut off.
    pub fn place(image: &Mat, target: &BBox, canvas: Size) -> Result<Mat> {
        let sx = target.width as f64 / image.cols().max(1) as f64;
        let sy = target.height as f64 / image.rows().max(1) as f64;
        let transform = Mat::from_slice_2d(&[
            [sx, 0.0, target.x as f64],
            [0.0, sy, target.y as f64],
        ])?;

        let mut placed = Mat::default();
        imgproc::warp_affine(
            image,
            &mut placed,
            &transform,
            canvas,
            imgproc::INTER_LINEAR,
            core::BORDER_CONSTANT,
            Scalar::all(0.0),
        )
        .context("Failed to place image")?;
        Ok(placed)
    }
}
