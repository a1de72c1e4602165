// eval/remap.rs — Linear interval remapping and channel quantization
//
// `remap_interval` is the single numeric primitive of the pipeline: pixel
// indices, frame indices and function outputs all pass through it.

use crate::error::{ArtError, Result};

/// Lower/upper bound of the value range that `color_map` expects.
pub const UNIT_MIN: f64 = -1.0;
pub const UNIT_MAX: f64 = 1.0;

/// Linearly map `value` from `[in_start, in_end]` onto `[out_start, out_end]`.
///
/// Values outside the input interval are extrapolated, not clamped.
/// A zero-width input interval is rejected with `InvalidInterval`.
pub fn remap_interval(
    value: f64,
    in_start: f64,
    in_end: f64,
    out_start: f64,
    out_end: f64,
) -> Result<f64> {
    let in_len = in_end - in_start;
    if in_len == 0.0 {
        return Err(ArtError::InvalidInterval {
            start: in_start,
            end: in_end,
        });
    }
    Ok(lerp_ratio((value - in_start) / in_len, out_start, out_end))
}

#[inline]
fn lerp_ratio(ratio: f64, out_start: f64, out_end: f64) -> f64 {
    ratio * (out_end - out_start) + out_start
}

/// Map a function output in `[-1, 1]` to an 8-bit channel value.
///
/// Truncates toward zero (not rounding), so `0.0 -> 127` and `0.5 -> 191`.
/// Out-of-range inputs are clamped to `[0, 255]` after truncation and NaN
/// maps to 0.
pub fn color_map(value: f64) -> u8 {
    // Fixed, non-degenerate input interval: no error path needed.
    let ratio = (value - UNIT_MIN) / (UNIT_MAX - UNIT_MIN);
    let code = lerp_ratio(ratio, 0.0, 255.0).trunc();
    if code.is_nan() {
        0
    } else {
        code.clamp(0.0, 255.0) as u8
    }
}
