//! Per-frame colour analysis and contour extraction

pub mod frame;

pub use frame::FrameAnalysis;
