//! Frame composition: video (optionally masked) OR'ed with a drawn overlay

use super::config::DisplayConfig;
use crate::Result;
use crate::detection::FrameAnalysis;
use crate::utils::ImageUtils;
use anyhow::Context;
use float_along_core::game::GoalView;
use float_along_core::{BBox, Bgr, PhaseKind, Snapshot, TrackedObject};
use opencv::{
    core::{self, Mat, Point as CvPoint, Rect, Scalar, Vector},
    highgui,
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};

/// Draws snapshots into the game window
pub struct Renderer {
    config: DisplayConfig,
    goal_image: Option<Mat>,
}

impl Renderer {
    pub fn new(config: DisplayConfig) -> Result<Self> {
        let goal_image = match &config.goal_image {
            Some(path) => {
                let image = ImageUtils::load_color(path)
                    .with_context(|| format!("Failed to load goal image: {:?}", path))?;
                log::info!("using goal image {:?}", path);
                Some(image)
            }
            None => None,
        };

        Ok(Self { config, goal_image })
    }

    pub fn window_name(&self) -> &str {
        &self.config.window_name
    }

    pub fn open_window(&self) -> Result<()> {
        highgui::named_window(&self.config.window_name, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("Failed to open window {}", self.config.window_name))?;
        Ok(())
    }

    pub fn show(&self, image: &Mat) -> Result<()> {
        highgui::imshow(&self.config.window_name, image).context("Failed to show frame")?;
        Ok(())
    }

    pub fn close(&self) -> Result<()> {
        highgui::destroy_window(&self.config.window_name)?;
        Ok(())
    }

    /// Final image for one tick
    pub fn compose(&self, analysis: &FrameAnalysis, snapshot: &Snapshot) -> Result<Mat> {
        let frame = self.render_frame(analysis, snapshot)?;
        let overlay = self.render_overlay(&frame, snapshot)?;

        let mut out = Mat::default();
        core::bitwise_or(&frame, &overlay, &mut out, &core::no_array()).context("Failed to compose overlay")?;
        Ok(out)
    }

    fn render_frame(&self, analysis: &FrameAnalysis, snapshot: &Snapshot) -> Result<Mat> {
        let frame = analysis.bgr();
        match (&snapshot.ball_range, snapshot.flags.show_mask) {
            (Some(range), true) => {
                let mask = analysis.mask(range)?;
                let mut masked = Mat::default();
                core::bitwise_and(frame, frame, &mut masked, &mask)?;
                Ok(masked)
            }
            _ => Ok(frame.clone()),
        }
    }

    fn render_overlay(&self, frame: &Mat, snapshot: &Snapshot) -> Result<Mat> {
        let mut overlay = Mat::new_rows_cols_with_default(frame.rows(), frame.cols(), frame.typ(), Scalar::all(0.0))?;

        if let Some(tracked) = &snapshot.tracked {
            self.draw_tracked(&mut overlay, tracked)?;
        }

        self.put_line(&mut overlay, &snapshot.status, 0, bgr_scalar(snapshot.status_color), self.config.text.scale)?;

        if let Some(goal) = &snapshot.goal {
            overlay = self.draw_goal(overlay, goal)?;
        }

        let in_setup = matches!(
            snapshot.phase,
            PhaseKind::AwaitingSetup | PhaseKind::SetupField | PhaseKind::SetupBall
        );
        if in_setup || snapshot.flags.show_dev_overlay {
            self.draw_field(&mut overlay, snapshot)?;
        }
        if snapshot.flags.show_dev_overlay {
            self.draw_dev_overlay(&mut overlay, snapshot)?;
        }

        Ok(overlay)
    }

    fn draw_tracked(&self, overlay: &mut Mat, tracked: &TrackedObject) -> Result<()> {
        imgproc::rectangle(overlay, to_rect(&tracked.bbox), scalar(self.config.colors.tracked_box), 2, LINE_8, 0)?;

        let contour: Vector<CvPoint> = tracked.contour.iter().map(|p| CvPoint::new(p.x, p.y)).collect();
        let mut contours: Vector<Vector<CvPoint>> = Vector::new();
        contours.push(contour);
        imgproc::draw_contours(
            overlay,
            &contours,
            -1,
            scalar(self.config.colors.contour),
            3,
            LINE_8,
            &core::no_array(),
            i32::MAX,
            CvPoint::new(0, 0),
        )?;
        Ok(())
    }

    fn draw_goal(&self, mut overlay: Mat, goal: &GoalView) -> Result<Mat> {
        if let Some(image) = &self.goal_image {
            let placed = ImageUtils::place(image, &goal.bbox, overlay.size()?)?;
            let mut merged = Mat::default();
            core::bitwise_or(&overlay, &placed, &mut merged, &core::no_array())?;
            overlay = merged;
        } else {
            imgproc::rectangle(&mut overlay, to_rect(&goal.bbox), scalar(self.config.colors.goal), 10, LINE_8, 0)?;
        }

        // celebration: a frame growing out of the goal while the point is pending
        if let Some(progress) = goal.progress {
            let grow = (progress * goal.bbox.width.max(goal.bbox.height) as f32 / 2.0) as i32;
            let ring = BBox::new(
                goal.bbox.x - grow,
                goal.bbox.y - grow,
                goal.bbox.width + 2 * grow,
                goal.bbox.height + 2 * grow,
            );
            let thickness = ((1.0 - progress) * 8.0) as i32 + 1;
            imgproc::rectangle(&mut overlay, to_rect(&ring), scalar(self.config.colors.goal_scored), thickness, LINE_AA, 0)?;
        }
        Ok(overlay)
    }

    fn draw_field(&self, overlay: &mut Mat, snapshot: &Snapshot) -> Result<()> {
        let color = scalar(self.config.colors.field);
        if let Some(field) = &snapshot.field {
            imgproc::rectangle(overlay, to_rect(field), color, 1, LINE_8, 0)?;
        }
        if let Some(corner) = snapshot.pending_corner {
            imgproc::circle(overlay, CvPoint::new(corner.x, corner.y), 5, color, imgproc::FILLED, LINE_8, 0)?;
        }
        Ok(())
    }

    fn draw_dev_overlay(&self, overlay: &mut Mat, snapshot: &Snapshot) -> Result<()> {
        let mut lines = vec![
            format!("phase {:?} points {}", snapshot.phase, snapshot.points),
            format!(
                "field ready {} ball ready {} ready {}",
                snapshot.field_ready, snapshot.ball_ready, snapshot.ready
            ),
        ];
        if let Some(range) = &snapshot.ball_range {
            lines.push(format!("hsv {:?} - {:?}", range.lower, range.upper));
        }
        if let Some(tracked) = &snapshot.tracked {
            lines.push(format!("ball {:?} area {:.0}", tracked.bbox, tracked.area));
        }
        if snapshot.flags.paused {
            lines.push("paused".to_string());
        }

        let color = scalar(self.config.colors.dev_text);
        let scale = self.config.text.scale * 0.5;
        for (i, line) in lines.iter().enumerate() {
            self.put_line(overlay, line, i as i32 + 1, color, scale)?;
        }
        Ok(())
    }

    /// Text on the `row`-th line below the status origin
    fn put_line(&self, overlay: &mut Mat, text: &str, row: i32, color: Scalar, scale: f64) -> Result<()> {
        let (x, y) = self.config.text.origin;
        let y = y + row * self.config.text.line_height;
        imgproc::put_text(
            overlay,
            text,
            CvPoint::new(x, y),
            FONT_HERSHEY_SIMPLEX,
            scale,
            color,
            self.config.text.thickness,
            LINE_AA,
            false,
        )?;
        Ok(())
    }
}

fn to_rect(bbox: &BBox) -> Rect {
    Rect::new(bbox.x, bbox.y, bbox.width, bbox.height)
}

fn scalar((b, g, r): (u8, u8, u8)) -> Scalar {
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

fn bgr_scalar(color: Bgr) -> Scalar {
    scalar((color.b, color.g, color.r))
}
