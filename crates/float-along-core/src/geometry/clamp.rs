//! One-sided channel clamps used when deriving HSV acceptance ranges.

/// Caps a channel value at 255. Values below the cap pass through untouched.
pub fn clamp_high(n: i32) -> i32 {
    n.min(255)
}

/// Floors a channel value at 0. Values above the floor pass through untouched.
pub fn clamp_low(n: i32) -> i32 {
    n.max(0)
}
