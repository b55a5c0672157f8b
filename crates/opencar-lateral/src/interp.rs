//! Piecewise linear interpolation over breakpoint tables.

/// Linearly interpolate `x` over breakpoints `xp` with values `fp`.
///
/// `xp` must be ascending. Inputs below the first breakpoint return the
/// first value, inputs above the last return the last value. Tables of
/// unequal length are truncated to the shorter one; an empty table yields
/// `0.0`.
///
/// # Example
///
/// ```
/// use opencar_lateral::interp;
///
/// let bp = [0.0, 5.0, 15.0];
/// let v = [20.0, 3.2, 0.6];
/// assert!((interp(2.5, &bp, &v) - 11.6).abs() < 1e-9);
/// assert!((interp(-1.0, &bp, &v) - 20.0).abs() < 1e-9);
/// assert!((interp(99.0, &bp, &v) - 0.6).abs() < 1e-9);
/// ```
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let len = xp.len().min(fp.len());
    let (Some(xp), Some(fp)) = (xp.get(..len), fp.get(..len)) else {
        return 0.0;
    };
    let (Some(&x_first), Some(&f_first)) = (xp.first(), fp.first()) else {
        return 0.0;
    };
    if x <= x_first {
        return f_first;
    }

    for (xs, fs) in xp.windows(2).zip(fp.windows(2)) {
        if let ([x0, x1], [f0, f1]) = (xs, fs) {
            if x <= *x1 {
                let span = x1 - x0;
                if span <= 0.0 {
                    return *f1;
                }
                return f0 + (x - x0) / span * (f1 - f0);
            }
        }
    }

    fp.last().copied().unwrap_or(f_first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_breakpoints() {
        let bp = [0.0, 5.0, 15.0];
        let v = [20.0, 14.0, 1.6];
        assert!((interp(0.0, &bp, &v) - 20.0).abs() < 1e-12);
        assert!((interp(5.0, &bp, &v) - 14.0).abs() < 1e-12);
        assert!((interp(15.0, &bp, &v) - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint() {
        assert!((interp(10.0, &[5.0, 15.0], &[14.0, 1.6]) - 7.8).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_is_constant() {
        assert!((interp(-3.0, &[1.0], &[7.0]) - 7.0).abs() < 1e-12);
        assert!((interp(30.0, &[1.0], &[7.0]) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_mismatched() {
        assert!(interp(1.0, &[], &[]).abs() < 1e-12);
        assert!((interp(10.0, &[0.0, 5.0, 15.0], &[1.0, 2.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_breakpoints() {
        assert!((interp(5.0, &[0.0, 5.0, 5.0, 10.0], &[0.0, 1.0, 3.0, 3.0]) - 1.0).abs() < 1e-12);
    }
}
