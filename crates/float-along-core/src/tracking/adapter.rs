use super::contour::Contour;
use crate::color::HsvRange;
use crate::config::TrackingConfig;
use crate::geometry::Point;
use crate::traits::FrameProbe;

/// How to pick one contour when several match the colour window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingHint {
    /// Nearest bounding-box centre to a position (used while calibrating)
    Position(Point),
    /// Nearest contour area to a reference area (used during play)
    Area(f64),
}

/// Pick the candidate best matching the hint.
///
/// Without a hint the first candidate wins. Ties keep the earliest candidate.
pub fn select_contour(candidates: Vec<Contour>, hint: Option<TrackingHint>) -> Option<Contour> {
    match hint {
        None => candidates.into_iter().next(),
        Some(TrackingHint::Position(at)) => candidates
            .into_iter()
            .min_by_key(|contour| contour.bbox.center().distance_sq(&at)),
        Some(TrackingHint::Area(reference)) => candidates.into_iter().min_by(|a, b| {
            let da = (a.area - reference).abs();
            let db = (b.area - reference).abs();
            da.total_cmp(&db)
        }),
    }
}

/// Locates the ball contour in a frame
#[derive(Debug, Clone, Default)]
pub struct ContourTracker {
    config: TrackingConfig,
}

impl ContourTracker {
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    /// Best contour for `range`, or `None` when nothing matching is visible
    pub fn locate<F: FrameProbe + ?Sized>(
        &self,
        frame: &F,
        range: &HsvRange,
        hint: Option<TrackingHint>,
    ) -> Option<Contour> {
        let mut candidates = frame.contours_in_range(range);
        let floor = self.config.min_contour_area;
        if floor > 0.0 {
            candidates.retain(|contour| contour.area > floor);
        }

        let selected = select_contour(candidates, hint);
        if selected.is_none() {
            log::trace!("no contour matches {:?}", range);
        }
        selected
    }
}
