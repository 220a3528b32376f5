//! Scalar helpers shared by the geometry routines.

/// Length of the interval `[lo, hi]`, clamped so inverted intervals are empty.
#[inline]
pub(crate) fn clamped_extent(lo: f32, hi: f32) -> f32 {
    (hi - lo).max(0.0)
}

/// Half of a box extent, used when moving between center and corner form.
#[inline]
pub(crate) fn half(extent: f32) -> f32 {
    extent / 2.0
}

#[cfg(test)]
mod tests {
    use super::{clamped_extent, half};

    #[test]
    fn clamped_extent_is_never_negative() {
        assert_eq!(clamped_extent(1.0, 3.5), 2.5);
        assert_eq!(clamped_extent(3.0, 1.0), 0.0);
        assert_eq!(clamped_extent(2.0, 2.0), 0.0);
    }

    #[test]
    fn half_splits_extent() {
        assert_eq!(half(3.0), 1.5);
        assert_eq!(half(-2.0), -1.0);
    }
}
