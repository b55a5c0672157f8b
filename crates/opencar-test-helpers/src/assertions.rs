//! Float assertion macros.

/// Assert that two floating-point values are approximately equal.
///
/// # Example
///
/// ```rust
/// use opencar_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0_f64, 1.0001_f64, 0.001_f64);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that a value lies within `[lo, hi]`.
///
/// # Example
///
/// ```rust
/// use opencar_test_helpers::assert_within;
///
/// assert_within!(0.5, 0.0, 1.0);
/// ```
#[macro_export]
macro_rules! assert_within {
    ($value:expr, $lo:expr, $hi:expr $(,)?) => {
        let value = $value;
        let lo = $lo;
        let hi = $hi;
        if !(value >= lo && value <= hi) {
            panic!(
                "assertion failed: `{:?}` not within [`{:?}`, `{:?}`]",
                value, lo, hi
            );
        }
    };
}
