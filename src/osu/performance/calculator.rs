use std::f64::consts::{PI, SQRT_2};

use crate::{
    model::mods::GameMods,
    osu::{
        attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
        score_state::OsuScoreState,
    },
    util::special_functions::{erf, erf_inv},
};

// * This is being adjusted to keep the final pp value scaled around what it used to be when changing things.
pub const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.0;

/// Exponent relating aim difficulty to star rating.
const AIM_STAR_EXPONENT: f64 = 0.829_842_642;

pub(super) struct OsuPerformanceCalculator {
    attrs: OsuDifficultyAttributes,
    mods: GameMods,
    acc: f64,
    state: OsuScoreState,
    effective_miss_count: f64,
}

impl OsuPerformanceCalculator {
    pub fn new(
        attrs: OsuDifficultyAttributes,
        mods: GameMods,
        state: OsuScoreState,
        effective_miss_count: f64,
    ) -> Self {
        Self {
            attrs,
            mods,
            acc: state.accuracy(),
            state,
            effective_miss_count,
        }
    }

    pub fn calculate(self) -> OsuPerformanceAttributes {
        if self.state.total_hits() == 0 {
            return OsuPerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        let deviation = self.calculate_deviation();

        let aim_value = self.compute_aim_value(deviation);
        let speed_value = self.compute_speed_value(deviation);
        let acc_value = self.compute_accuracy_value(deviation);
        let flashlight_value = self.compute_flashlight_value();

        let pp = PERFORMANCE_BASE_MULTIPLIER
            * (aim_value + speed_value + acc_value + flashlight_value);

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_acc: acc_value,
            pp_aim: aim_value,
            pp_flashlight: flashlight_value,
            pp_speed: speed_value,
            effective_miss_count: self.effective_miss_count,
            deviation,
        }
    }

    fn compute_aim_value(&self, deviation: Option<f64>) -> f64 {
        if self.state.successful_hits() == 0 {
            return 0.0;
        }

        let mut aim_difficulty = self.attrs.aim;

        // * Penalize misses. This is an approximation of skill level derived from assuming all objects have equal hit probabilities.
        if self.effective_miss_count > 0.0 {
            let penalty = miss_penalty(self.effective_miss_count, self.state.total_hits());
            aim_difficulty *= penalty.powf(AIM_STAR_EXPONENT);
        }

        let mut aim_value = aim_difficulty.powi(3);

        // * Temporarily handling of slider-only maps:
        if i64::from(self.attrs.n_circles) - i64::from(self.state.misses) == 0 {
            return aim_value;
        }

        let deviation = match deviation {
            None => return aim_value,
            Some(deviation) if deviation.is_infinite() => return 0.0,
            Some(deviation) => deviation,
        };

        if self.mods.hd() {
            // * We want to give more reward for lower AR when it comes to aim and HD. This nerfs high AR and buffs lower AR.
            aim_value *= 1.0 + 0.04 * (12.0 - self.attrs.ar);
        }

        aim_value * erf(50.0 / (SQRT_2 * deviation))
    }

    fn compute_speed_value(&self, deviation: Option<f64>) -> f64 {
        if self.mods.rx() || self.state.successful_hits() == 0 {
            return 0.0;
        }

        let mut speed_value = self.attrs.speed.powi(3);

        let deviation = match deviation {
            None => return speed_value,
            Some(deviation) if deviation.is_infinite() => return 0.0,
            Some(deviation) => deviation,
        };

        if self.mods.hd() {
            speed_value *= 1.0 + 0.04 * (12.0 - self.attrs.ar);
        }

        speed_value * erf(20.0 / (SQRT_2 * deviation))
    }

    fn compute_accuracy_value(&self, deviation: Option<f64>) -> f64 {
        if self.mods.rx() || self.attrs.n_circles == 0 || self.state.successful_hits() == 0 {
            return 0.0;
        }

        let Some(deviation) = deviation else {
            return 0.0;
        };

        let mut acc_value = 90.0 * (7.5 / deviation).powi(2);

        if self.mods.hd() {
            acc_value *= 1.08;
        }

        acc_value
    }

    fn compute_flashlight_value(&self) -> f64 {
        if !self.mods.fl() {
            return 0.0;
        }

        let mut raw_flashlight = self.attrs.flashlight;

        if self.mods.td() {
            raw_flashlight = raw_flashlight.powf(0.8);
        }

        let mut flashlight_value = raw_flashlight.powi(2) * 25.0;

        let total_hits = f64::from(self.state.total_hits());

        // * Penalize misses by assessing # of misses relative to the total # of objects. Default a 3% reduction for any # of misses.
        if self.effective_miss_count > 0.0 {
            flashlight_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count.powf(0.875));
        }

        flashlight_value *= self.get_combo_scaling_factor();

        // * Account for shorter maps having a higher ratio of 0 combo/100 combo flashlight radius.
        flashlight_value *= 0.7
            + 0.1 * (total_hits / 200.0).min(1.0)
            + if total_hits > 200.0 {
                0.2 * ((total_hits - 200.0) / 200.0).min(1.0)
            } else {
                0.0
            };

        // * Scale the flashlight value with accuracy _slightly_.
        flashlight_value *= 0.5 + self.acc / 2.0;
        // * It is important to also consider accuracy difficulty when doing that.
        flashlight_value *= 0.98 + self.attrs.od.powi(2) / 2500.0;

        flashlight_value
    }

    /// Estimated standard deviation of hit errors on circles.
    fn calculate_deviation(&self) -> Option<f64> {
        if self.attrs.n_circles == 0 {
            return None;
        }

        let n_circles = f64::from(self.attrs.n_circles);
        let great_hit_window = 80.0 - 6.0 * self.attrs.od;
        let great_probability = (n_circles
            - f64::from(self.state.n100)
            - f64::from(self.state.n50)
            - f64::from(self.state.misses))
            / (n_circles + 1.0);

        if great_probability <= 0.0 {
            return Some(f64::INFINITY);
        }

        Some(great_hit_window / (SQRT_2 * erf_inv(great_probability)))
    }

    fn get_combo_scaling_factor(&self) -> f64 {
        if self.attrs.max_combo == 0 {
            1.0
        } else {
            (f64::from(self.state.max_combo).powf(0.8) / f64::from(self.attrs.max_combo).powf(0.8))
                .min(1.0)
        }
    }
}

/// Ratio by which the full combo skill level shrinks when `miss_count` out
/// of `n_objects` equally difficult objects may be missed.
///
/// Derived from a fourth order moment expansion of `erf_inv` around the beta
/// distributed `n - m`-th order statistic. Returns `0.0` if there are no
/// objects or the ratio is not finite, e.g. when every object was missed.
pub fn miss_penalty(miss_count: f64, n_objects: u32) -> f64 {
    if n_objects == 0 {
        return 0.0;
    }

    let n = f64::from(n_objects);

    let s = |m: f64| {
        let y = erf_inv((n - m) / (n + 1.0));

        // * Derivatives of ErfInv:
        let y1 = (y * y).exp() * PI.sqrt() / 2.0;
        let y2 = 2.0 * y * y1 * y1;
        let y3 = 2.0 * y1 * (y * y2 + (2.0 * (y * y) + 1.0) * (y1 * y1));
        let y4 = 2.0
            * y1
            * (y * y3
                + (6.0 * (y * y) + 3.0) * y1 * y2
                + (4.0 * (y * y * y) + 6.0 * y) * (y1 * y1 * y1));

        let (u2, u3, u4) = beta_central_moments(n - m, m + 1.0);

        SQRT_2 * (y + 0.5 * y2 * u2 + 1.0 / 6.0 * y3 * u3 + 1.0 / 24.0 * y4 * u4)
    };

    let penalty = s(miss_count) / s(0.0);

    if penalty.is_finite() {
        penalty
    } else {
        0.0
    }
}

/// Second, third, and fourth central moment of `Beta(a, b)`.
fn beta_central_moments(a: f64, b: f64) -> (f64, f64, f64) {
    let u2 = a * b / ((a + b) * (a + b) * (a + b + 1.0));
    let u3 = 2.0 * (b - a) * a * b
        / ((a + b + 2.0) * (a + b) * (a + b) * (a + b) * (a + b + 1.0));
    let u4 = (3.0
        + 6.0 * ((a - b) * (a + b + 1.0) - a * b * (a + b + 2.0))
            / (a * b * (a + b + 2.0) * (a + b + 3.0)))
        * (u2 * u2);

    (u2, u3, u4)
}
