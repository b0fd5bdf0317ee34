//! Bracketed root finding.

use thiserror::Error;

/// Absolute accuracy used when none is specified.
pub const DEFAULT_ACCURACY: f64 = 1e-8;

/// Iteration limit for [`brent`].
pub const MAX_ITERATIONS: usize = 100;

/// Relative tolerance below which two bounds are considered identical.
const RELATIVE_EQ_TOLERANCE: f64 = 10.0 * (f64::EPSILON / 2.0);

/// Failure to locate a root.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum RootError {
    #[error("interval [{lower}, {upper}] does not bracket a root")]
    NotBracketed { lower: f64, upper: f64 },
    #[error("no root within {iterations} iterations")]
    NonConvergence { iterations: usize },
    #[error("accuracy cannot be improved further around {root}")]
    Stalled { root: f64 },
}

/// Find a root of `f` within `[lower, upper]` using Brent's method.
///
/// The function values at both bounds must have opposite signs. A bound at
/// which `f` is exactly zero is returned as is.
///
/// Converges once the bracket shrinks below `accuracy` or `|f(root)|` drops
/// below `accuracy`.
pub fn brent<F>(f: F, lower: f64, upper: f64, accuracy: f64) -> Result<f64, RootError>
where
    F: Fn(f64) -> f64,
{
    brent_with_iterations(f, lower, upper, accuracy, MAX_ITERATIONS)
}

/// Same as [`brent`] but with a custom iteration limit.
#[allow(clippy::float_cmp, clippy::many_single_char_names)]
pub fn brent_with_iterations<F>(
    f: F,
    mut lower: f64,
    mut upper: f64,
    accuracy: f64,
    max_iterations: usize,
) -> Result<f64, RootError>
where
    F: Fn(f64) -> f64,
{
    let mut f_min = f(lower);
    let mut f_max = f(upper);

    if f_min == 0.0 {
        return Ok(lower);
    } else if f_max == 0.0 {
        return Ok(upper);
    }

    if f_min.is_nan() || f_max.is_nan() || sign(f_min) == sign(f_max) {
        return Err(RootError::NotBracketed { lower, upper });
    }

    let mut root = upper;
    let mut f_root = f_max;
    let mut d = 0.0;
    let mut e = 0.0;
    let mut x_mid = f64::NAN;

    for _ in 0..=max_iterations {
        // Keep the root bracketed between `root` and `upper`
        if sign(f_root) == sign(f_max) {
            upper = lower;
            f_max = f_min;
            d = root - lower;
            e = d;
        }

        if f_max.abs() < f_root.abs() {
            lower = root;
            root = upper;
            upper = lower;
            f_min = f_root;
            f_root = f_max;
            f_max = f_min;
        }

        let x_acc = f64::EPSILON * root.abs() + 0.5 * accuracy;
        let x_mid_old = x_mid;
        x_mid = (upper - root) / 2.0;

        if x_mid.abs() <= x_acc || f_root.abs() < accuracy {
            return Ok(root);
        }

        if x_mid == x_mid_old {
            return Err(RootError::Stalled { root });
        }

        if e.abs() >= x_acc && f_min.abs() > f_root.abs() {
            // Inverse quadratic interpolation, or secant if only two points
            let s = f_root / f_min;

            let (mut p, mut q) = if almost_eq_relative(lower, upper) {
                (2.0 * x_mid * s, 1.0 - s)
            } else {
                let q = f_min / f_max;
                let r = f_root / f_max;

                (
                    s * (2.0 * x_mid * q * (q - r) - (root - lower) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }

            p = p.abs();

            if 2.0 * p < f64::min(3.0 * x_mid * q - (x_acc * q).abs(), (e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = x_mid;
                e = d;
            }
        } else {
            // Bounds shrink too slowly, bisect
            d = x_mid;
            e = d;
        }

        lower = root;
        f_min = f_root;

        if d.abs() > x_acc {
            root += d;
        } else {
            root += x_acc.copysign(x_mid);
        }

        f_root = f(root);
    }

    Err(RootError::NonConvergence {
        iterations: max_iterations,
    })
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

fn almost_eq_relative(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();

    if a.abs() < RELATIVE_EQ_TOLERANCE || b.abs() < RELATIVE_EQ_TOLERANCE {
        return diff < RELATIVE_EQ_TOLERANCE;
    }

    diff / a.abs().max(b.abs()) < RELATIVE_EQ_TOLERANCE
}

#[cfg(test)]
mod tests {
    use std::f64::consts::SQRT_2;

    use super::*;

    #[test]
    fn square_root() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, DEFAULT_ACCURACY).unwrap();

        assert!((root - SQRT_2).abs() < 1e-8, "{root}");
    }

    #[test]
    fn reversed_bounds() {
        let root = brent(|x| x * x * x - 8.0, 5.0, 0.0, DEFAULT_ACCURACY).unwrap();

        assert!((root - 2.0).abs() < 1e-8, "{root}");
    }

    #[test]
    fn exact_bound() {
        assert_eq!(brent(|x| x - 1.0, 1.0, 3.0, 1e-4), Ok(1.0));
        assert_eq!(brent(|x| x - 3.0, 1.0, 3.0, 1e-4), Ok(3.0));
    }

    #[test]
    fn not_bracketed() {
        let err = brent(|x| x * x + 1.0, -1.0, 1.0, DEFAULT_ACCURACY).unwrap_err();

        assert_eq!(
            err,
            RootError::NotBracketed {
                lower: -1.0,
                upper: 1.0
            }
        );
    }

    #[test]
    fn nan_is_not_bracketed() {
        let err = brent(|_| f64::NAN, 0.0, 1.0, DEFAULT_ACCURACY).unwrap_err();

        assert!(matches!(err, RootError::NotBracketed { .. }));
    }

    #[test]
    fn iteration_limit() {
        let err = brent_with_iterations(|x: f64| x.cos() - x, 0.0, 1.0, 1e-15, 0).unwrap_err();

        assert_eq!(err, RootError::NonConvergence { iterations: 0 });
    }

    #[test]
    fn deterministic() {
        let f = |x: f64| x.exp() - 3.0;

        assert_eq!(brent(f, 0.0, 2.0, 1e-4), brent(f, 0.0, 2.0, 1e-4));
    }
}
