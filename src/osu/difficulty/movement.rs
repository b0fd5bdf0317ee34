//! Minimum-jerk model of the cursor moving between two objects.
//!
//! The cursor covers `dist` within `delta_time` along a quintic polynomial
//! that starts at position `0` with `initial_vel` and ends at `dist` with
//! `final_vel`, both with zero acceleration.

use crate::util::root_finding::{brent, RootError};

/// Absolute accuracy when solving for crossing times.
pub const CROSSING_ACCURACY: f64 = 1e-4;

/// Distance covered after `t` milliseconds.
///
/// Satisfies `position_at(d, dt, v0, v1, 0.0) == 0.0` and
/// `position_at(d, dt, v0, v1, dt) == d`.
pub fn position_at(dist: f64, delta_time: f64, initial_vel: f64, final_vel: f64, t: f64) -> f64 {
    let dt2 = delta_time * delta_time;
    let dt3 = dt2 * delta_time;
    let dt4 = dt3 * delta_time;
    let dt5 = dt4 * delta_time;

    let c1 = (10.0 * dist - delta_time * (4.0 * final_vel + 6.0 * initial_vel)) / dt3;
    let c2 = (15.0 * dist - delta_time * (7.0 * final_vel + 8.0 * initial_vel)) / dt4;
    let c3 = (6.0 * dist - delta_time * (3.0 * final_vel + 3.0 * initial_vel)) / dt5;

    let t3 = t * t * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    initial_vel * t + c1 * t3 - c2 * t4 + c3 * t5
}

/// The time within `[0, delta_time]` at which a cursor starting and ending at
/// rest reaches `target`.
pub fn crossing_time(dist: f64, delta_time: f64, target: f64) -> Result<f64, RootError> {
    brent(
        |t| position_at(dist, delta_time, 0.0, 0.0, t) - target,
        0.0,
        delta_time,
        CROSSING_ACCURACY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_conditions() {
        for (dist, delta_time, v0, v1) in [(100.0, 200.0, 0.0, 0.0), (3.5, 25.0, 0.1, 0.4)] {
            assert!(position_at(dist, delta_time, v0, v1, 0.0).abs() < 1e-12);
            assert!((position_at(dist, delta_time, v0, v1, delta_time) - dist).abs() < 1e-9);
        }
    }

    #[test]
    fn rest_to_rest_is_monotonic() {
        let mut prev = 0.0;

        for i in 1..=100 {
            let curr = position_at(50.0, 100.0, 0.0, 0.0, f64::from(i));
            assert!(curr >= prev);
            prev = curr;
        }
    }

    #[test]
    fn symmetric_midpoint() {
        let mid = position_at(80.0, 120.0, 0.0, 0.0, 60.0);
        assert!((mid - 40.0).abs() < 1e-9);
    }

    #[test]
    fn crossing() {
        let t = crossing_time(10.0, 100.0, 9.0).unwrap();

        assert!(t > 50.0 && t < 100.0);
        assert!((position_at(10.0, 100.0, 0.0, 0.0, t) - 9.0).abs() < 1e-3);
    }

    #[test]
    fn unreachable_target() {
        assert!(crossing_time(10.0, 100.0, 11.0).is_err());
    }
}
