//! Small numeric helpers.

/// Floor a value to an integer, saturating at the `i32` bounds.
///
/// Faster than `f64::floor` followed by a cast because it skips the
/// intermediate float rounding; negative values round toward negative infinity.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    let truncated = value as i32;
    if value < f64::from(truncated) {
        truncated - 1
    } else {
        truncated
    }
}

/// Linear interpolation between `a` and `b` by `t`.
#[inline]
#[must_use]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}
