//! Aim difficulty expressed as the skill level at which a full combo becomes
//! more likely than not.
//!
//! Every object gets a raw difficulty from the distance to travel and the
//! time the cursor spends within the object. Hitting an object with skill
//! `s` succeeds with probability `erf(s / (√2 · d))` and the aim rating is the
//! skill level at which the product of all hit probabilities equals
//! [`FC_PROBABILITY_THRESHOLD`].
//!
//! Distances are measured in circle radii so objects closer than one radius
//! overlap by at least half.

use std::f64::consts::SQRT_2;

use crate::{
    osu::difficulty::{
        error::DifficultyError,
        movement,
        object::{DifficultyObjects, OsuDifficultyObject},
    },
    util::{
        float_ext::FloatExt,
        root_finding::{self, DEFAULT_ACCURACY},
        special_functions::{erf, erf_inv},
    },
};

use super::Skill;

/// Probability of a full combo at the resulting skill level.
pub const FC_PROBABILITY_THRESHOLD: f64 = 0.5;

/// Time in ms the cursor is assumed to stay on the last object.
const TERMINAL_TIME_IN_NOTE: f64 = 200.0;

/// Aim skill based on full combo probability.
#[derive(Clone, Debug, Default)]
pub struct Aim {
    difficulties: Vec<f64>,
}

impl Aim {
    pub const fn new() -> Self {
        Self {
            difficulties: Vec::new(),
        }
    }

    /// Raw difficulty of each processed object in order.
    pub fn difficulties(&self) -> &[f64] {
        &self.difficulties
    }

    fn skill_level(&self) -> f64 {
        let max_difficulty = self.difficulties.iter().copied().fold(0.0, f64::max);
        let n = self.difficulties.len() as f64;

        // * Lower bound: skill level at which the hardest object alone is hit with the threshold probability.
        // * Upper bound: skill level at which every object is hit with the n-th root of the threshold.
        let lower = erf_inv(FC_PROBABILITY_THRESHOLD) * max_difficulty * SQRT_2;
        let upper = erf_inv(FC_PROBABILITY_THRESHOLD.powf(n.recip())) * max_difficulty * SQRT_2;

        let f = |skill| fc_probability(skill, &self.difficulties) - FC_PROBABILITY_THRESHOLD;

        match root_finding::brent(f, lower, upper, DEFAULT_ACCURACY) {
            Ok(skill) => skill,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(lower, upper, "Unable to solve aim skill level: {_err}");

                0.0
            }
        }
    }
}

impl Skill for Aim {
    fn process(
        &mut self,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<(), DifficultyError> {
        let difficulty = AimEvaluator::evaluate_diff_of(curr, objects)?;
        self.difficulties.push(difficulty);

        Ok(())
    }

    fn difficulty_value(&self) -> f64 {
        let sum: f64 = self.difficulties.iter().sum();

        if FloatExt::eq(sum, 0.0) {
            return 0.0;
        }

        self.skill_level()
    }
}

/// Probability to hit an object of the given difficulty with the given skill.
pub fn hit_probability(difficulty: f64, skill: f64) -> f64 {
    if FloatExt::eq(difficulty, 0.0) {
        return 1.0;
    }

    if FloatExt::eq(skill, 0.0) {
        return 0.0;
    }

    erf(skill / (SQRT_2 * difficulty))
}

fn fc_probability(skill: f64, difficulties: &[f64]) -> f64 {
    difficulties
        .iter()
        .fold(1.0, |prob, &difficulty| prob * hit_probability(difficulty, skill))
}

/// Raw aim difficulty of a single object.
pub struct AimEvaluator;

impl AimEvaluator {
    pub fn evaluate_diff_of(
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<f64, DifficultyError> {
        if curr.is_spinner() {
            return Ok(0.0);
        }

        let velocity = Self::in_radii(curr.min_jump_dist) / curr.strain_time;
        let coordination = Self::coordination_difficulty_of(curr, objects)?;

        Ok(velocity + coordination)
    }

    /// Inverse of half the time the cursor spends within the object.
    fn coordination_difficulty_of(
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<f64, DifficultyError> {
        let entering = Self::time_in_note_entering(curr)?;

        let exiting = match curr.next(0, objects) {
            Some(next) => Self::time_in_note_exiting(curr, next)?,
            None => TERMINAL_TIME_IN_NOTE,
        };

        let hit_window = (entering + exiting) / 2.0;

        Ok(hit_window.recip())
    }

    /// Difficulty object distances in multiples of the circle radius.
    fn in_radii(dist: f64) -> f64 {
        dist / f64::from(OsuDifficultyObject::NORMALIZED_RADIUS)
    }

    /// Time between the cursor entering the object's radius and reaching
    /// the object.
    pub fn time_in_note_entering(curr: &OsuDifficultyObject) -> Result<f64, DifficultyError> {
        let dist = Self::in_radii(curr.lazy_jump_dist);

        // * Objects overlapping by at least 50%
        if dist <= 1.0 {
            return Ok(curr.strain_time);
        }

        let entry_time = movement::crossing_time(dist, curr.strain_time, dist - 1.0)
        .map_err(|source| DifficultyError::CursorCrossing {
            idx: curr.idx,
            source,
        })?;

        Ok(curr.strain_time - entry_time)
    }

    /// Time between leaving `curr` and the cursor exiting its radius on the
    /// way to `next`.
    pub fn time_in_note_exiting(
        curr: &OsuDifficultyObject,
        next: &OsuDifficultyObject,
    ) -> Result<f64, DifficultyError> {
        let dist = Self::in_radii(next.lazy_jump_dist);

        if dist <= 1.0 {
            return Ok(next.strain_time);
        }

        movement::crossing_time(dist, next.strain_time, 1.0).map_err(|source| {
            DifficultyError::CursorCrossing {
                idx: curr.idx,
                source,
            }
        })
    }
}
