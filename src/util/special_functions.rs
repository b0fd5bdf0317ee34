//! Gauss error function and its inverse.
//!
//! `erf_inv` saturates to `±inf` for arguments at or beyond `±1` and is
//! accurate to roughly `1e-11`.

pub use statrs::function::erf::{erf, erf_inv};

#[cfg(test)]
mod tests {
    use std::f64::consts::SQRT_2;

    use super::*;

    #[test]
    fn inverse_roundtrip() {
        for p in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let x = erf_inv(p);
            assert!((erf(x) - p).abs() < 1e-10, "erf(erf_inv({p})) = {}", erf(x));
        }
    }

    #[test]
    fn boundaries() {
        assert!(erf_inv(0.0).abs() < f64::EPSILON);
        assert_eq!(erf_inv(1.0), f64::INFINITY);
        assert!(erf(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_sigma() {
        // P(|X| < sigma) for a normal distribution
        assert!((erf(1.0 / SQRT_2) - 0.682_689_492_137_086).abs() < 1e-10);
    }
}
