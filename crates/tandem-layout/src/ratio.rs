/// Smallest share of the split axis the terminal panel can be dragged to.
pub const MIN_RATIO: f64 = 0.15;
/// Largest share of the split axis the terminal panel can be dragged to.
pub const MAX_RATIO: f64 = 0.85;
/// The even split used when no drag has happened.
pub const DEFAULT_RATIO: f64 = 0.5;

/// Terminal share of the split axis for a pointer `offset` pixels into a
/// container `extent` pixels long, clamped to `[MIN_RATIO, MAX_RATIO]`.
///
/// A non-finite offset or a non-positive (or non-finite) extent yields
/// `DEFAULT_RATIO`.
pub fn split_ratio(offset: f64, extent: f64) -> f64 {
    if !offset.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return DEFAULT_RATIO;
    }
    (offset / extent).clamp(MIN_RATIO, MAX_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_inside_bounds_is_exact() {
        assert!((split_ratio(300.0, 1000.0) - 0.3).abs() < 1e-9);
        assert!((split_ratio(500.0, 1000.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ratio_clamps_to_bounds() {
        assert_eq!(split_ratio(10.0, 1000.0), MIN_RATIO);
        assert_eq!(split_ratio(-50.0, 1000.0), MIN_RATIO);
        assert_eq!(split_ratio(990.0, 1000.0), MAX_RATIO);
        assert_eq!(split_ratio(5000.0, 1000.0), MAX_RATIO);
    }

    #[test]
    fn degenerate_inputs_give_even_split() {
        assert_eq!(split_ratio(100.0, 0.0), DEFAULT_RATIO);
        assert_eq!(split_ratio(100.0, -10.0), DEFAULT_RATIO);
        assert_eq!(split_ratio(f64::NAN, 100.0), DEFAULT_RATIO);
        assert_eq!(split_ratio(f64::INFINITY, 100.0), DEFAULT_RATIO);
        assert_eq!(split_ratio(10.0, f64::NAN), DEFAULT_RATIO);
    }

    #[test]
    fn ratio_always_within_bounds() {
        for i in -20..=120 {
            let r = split_ratio(i as f64 * 10.0, 1000.0);
            assert!((MIN_RATIO..=MAX_RATIO).contains(&r), "{r} out of bounds");
        }
    }
}
