//! Colour samples and the HSV acceptance window derived from them

use crate::geometry::{clamp_high, clamp_low};
use serde::{Deserialize, Serialize};

/// Pixel colour in OpenCV's native BGR channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// Pixel colour in OpenCV's 8-bit HSV space (hue in 0..=179)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Half-widths of the acceptance window around a sampled colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvMargins {
    pub hue: i32,
    pub saturation: i32,
    pub value: i32,
}

impl Default for HsvMargins {
    fn default() -> Self {
        Self {
            hue: 10,
            saturation: 120,
            value: 120,
        }
    }
}

/// Inclusive HSV bounds handed to the masking step.
///
/// Bounds are kept as `i32` because the clamp pairing below lets a lower
/// bound go negative or an upper bound exceed its channel; the mask treats
/// such bounds as open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [i32; 3],
    pub upper: [i32; 3],
}

impl HsvRange {
    /// Derive the window around a sample.
    ///
    /// Lower bounds are all capped with `clamp_high`; the upper hue and
    /// saturation bounds are floored with `clamp_low` while the upper value
    /// bound is capped with `clamp_high`. This pairing is what the game has
    /// always shipped with and masks depend on it.
    pub fn around(sample: Hsv, margins: &HsvMargins) -> Self {
        let (h, s, v) = (sample.h as i32, sample.s as i32, sample.v as i32);
        Self {
            lower: [
                clamp_high(h - margins.hue),
                clamp_high(s - margins.saturation),
                clamp_high(v - margins.value),
            ],
            upper: [
                clamp_low(h + margins.hue),
                clamp_low(s + margins.saturation),
                clamp_high(v + margins.value),
            ],
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        let channels = [hsv.h as i32, hsv.s as i32, hsv.v as i32];
        channels
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }
}

/// Calibrated ball colour: the clicked BGR sample and its HSV window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationColor {
    pub sample: Bgr,
    pub range: HsvRange,
}

impl CalibrationColor {
    pub fn new(sample: Bgr, hsv: Hsv, margins: &HsvMargins) -> Self {
        Self {
            sample,
            range: HsvRange::around(hsv, margins),
        }
    }
}
