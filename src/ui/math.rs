//! Scalar helpers

/// Linearly map `val` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Not clamped. A degenerate input range maps everything to `out_min`.
pub fn remap(val: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let t = (val - in_min) / span;
    out_min + t * (out_max - out_min)
}
