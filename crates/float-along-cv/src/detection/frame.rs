//! HSV view of one frame, implementing the core's frame probe

use crate::Result;
use anyhow::Context;
use float_along_core::traits::FrameProbe;
use float_along_core::{BBox, Bgr, Contour, Hsv, HsvRange, Point};
use opencv::{
    core::{self, Mat, Point as CvPoint, Scalar, Vec3b, Vector},
    imgproc,
    prelude::*,
};

/// A BGR frame together with its HSV conversion.
///
/// Built once per tick so colour sampling and masking share one conversion.
pub struct FrameAnalysis {
    bgr: Mat,
    hsv: Mat,
}

impl FrameAnalysis {
    pub fn new(bgr: Mat) -> Result<Self> {
        let mut hsv = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut hsv, imgproc::COLOR_BGR2HSV)
            .context("Failed to convert frame to HSV")?;
        Ok(Self { bgr, hsv })
    }

    pub fn bgr(&self) -> &Mat {
        &self.bgr
    }

    /// Binary mask of the pixels inside `range`
    pub fn mask(&self, range: &HsvRange) -> Result<Mat> {
        let lower = Scalar::new(range.lower[0] as f64, range.lower[1] as f64, range.lower[2] as f64, 0.0);
        let upper = Scalar::new(range.upper[0] as f64, range.upper[1] as f64, range.upper[2] as f64, 0.0);

        let mut mask = Mat::default();
        core::in_range(&self.hsv, &lower, &upper, &mut mask).context("Colour thresholding failed")?;
        Ok(mask)
    }

    /// Raw OpenCV contours of the mask, for drawing
    pub fn find_contours(&self, range: &HsvRange) -> Result<Vector<Vector<CvPoint>>> {
        let mask = self.mask(range)?;
        let mut contours: Vector<Vector<CvPoint>> = Vector::new();
        imgproc::find_contours(
            &mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            CvPoint::new(0, 0),
        )
        .context("Contour extraction failed")?;
        Ok(contours)
    }

    fn measured_contours(&self, range: &HsvRange) -> Result<Vec<Contour>> {
        let mut measured = Vec::new();
        for contour in self.find_contours(range)? {
            let rect = imgproc::bounding_rect(&contour)?;
            let area = imgproc::contour_area(&contour, false)?;
            let points = contour.iter().map(|p| Point::new(p.x, p.y)).collect();
            measured.push(Contour::new(
                points,
                BBox::new(rect.x, rect.y, rect.width, rect.height),
                area,
            ));
        }
        Ok(measured)
    }

    fn pixel(mat: &Mat, at: Point) -> Option<[u8; 3]> {
        if at.x < 0 || at.y < 0 || at.x >= mat.cols() || at.y >= mat.rows() {
            return None;
        }
        mat.at_2d::<Vec3b>(at.y, at.x).ok().map(|px| [px[0], px[1], px[2]])
    }
}

impl FrameProbe for FrameAnalysis {
    fn dimensions(&self) -> (i32, i32) {
        (self.bgr.cols(), self.bgr.rows())
    }

    fn color_at(&self, at: Point) -> Option<Bgr> {
        Self::pixel(&self.bgr, at).map(|[b, g, r]| Bgr::new(b, g, r))
    }

    fn hsv_at(&self, at: Point) -> Option<Hsv> {
        Self::pixel(&self.hsv, at).map(|[h, s, v]| Hsv::new(h, s, v))
    }

    fn contours_in_range(&self, range: &HsvRange) -> Vec<Contour> {
        match self.measured_contours(range) {
            Ok(contours) => contours,
            Err(e) => {
                log::warn!("contour detection failed: {:#}", e);
                Vec::new()
            }
        }
    }
}
