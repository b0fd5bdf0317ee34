use self::calculator::OsuPerformanceCalculator;

use super::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    score_state::OsuScoreState,
};

use crate::model::mods::GameMods;

mod calculator;

pub use self::calculator::miss_penalty;

/// Performance calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use rosu_fc_pp::{model::hit_object::{HitObject, Pos}, Beatmap, OsuPerformance};
///
/// let map = Beatmap::new(vec![
///     HitObject::circle(Pos::new(0.0, 0.0), 0.0),
///     HitObject::circle(Pos::new(150.0, 0.0), 300.0),
///     HitObject::circle(Pos::new(150.0, 150.0), 600.0),
/// ]);
///
/// let attrs = OsuPerformance::new(map.difficulty().unwrap())
///     .n300(2)
///     .n100(1)
///     .calculate();
///
/// assert!(attrs.pp >= 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct OsuPerformance {
    attrs: OsuDifficultyAttributes,
    mods: GameMods,
    acc: Option<f64>,
    combo: Option<u32>,

    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    misses: Option<u32>,
    hitresult_priority: HitResultPriority,
}

impl OsuPerformance {
    /// Create a new performance calculator for the given difficulty
    /// attributes.
    ///
    /// The attributes should be calculated with the same mods that are
    /// passed to [`mods`](Self::mods).
    pub fn new(attrs: impl Into<OsuDifficultyAttributes>) -> Self {
        Self {
            attrs: attrs.into(),
            mods: GameMods::NONE,
            acc: None,
            combo: None,

            n300: None,
            n100: None,
            n50: None,
            misses: None,
            hitresult_priority: HitResultPriority::default(),
        }
    }

    /// Specify mods.
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify how hitresults should be generated.
    ///
    /// Defauls to [`HitResultPriority::BestCase`].
    pub const fn hitresult_priority(mut self, priority: HitResultPriority) -> Self {
        self.hitresult_priority = priority;

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn misses(mut self, misses: u32) -> Self {
        self.misses = Some(misses);

        self
    }

    /// Provide parameters through an [`OsuScoreState`].
    pub const fn state(mut self, state: OsuScoreState) -> Self {
        let OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.misses = Some(misses);

        self
    }

    /// Specify the accuracy of a play between `0.0` and `100.0`.
    /// This will be used to generate matching hitresults.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc.clamp(0.0, 100.0) / 100.0);

        self
    }

    /// Create the [`OsuScoreState`] that will be used for performance calculation.
    ///
    /// Unspecified hitresults are filled in so that the total matches the
    /// amount of objects.
    #[allow(clippy::too_many_lines)]
    pub fn generate_state(&self) -> OsuScoreState {
        let max_combo = self.attrs.max_combo;
        let n_objects = self.attrs.n_objects();
        let priority = self.hitresult_priority;

        let misses = self.misses.map_or(0, |n| n.min(n_objects));
        let n_remaining = n_objects - misses;

        let mut n300 = self.n300.map_or(0, |n| n.min(n_remaining));
        let mut n100 = self.n100.map_or(0, |n| n.min(n_remaining));
        let mut n50 = self.n50.map_or(0, |n| n.min(n_remaining));

        if let Some(acc) = self.acc {
            let target_total = acc * f64::from(6 * n_objects);

            match (self.n300, self.n100, self.n50) {
                (Some(_), Some(_), Some(_)) => {
                    let remaining = n_objects.saturating_sub(n300 + n100 + n50 + misses);

                    match priority {
                        HitResultPriority::BestCase => n300 += remaining,
                        HitResultPriority::WorstCase => n50 += remaining,
                    }
                }
                (Some(_), Some(_), None) => n50 = n_objects.saturating_sub(n300 + n100 + misses),
                (Some(_), None, Some(_)) => n100 = n_objects.saturating_sub(n300 + n50 + misses),
                (None, Some(_), Some(_)) => n300 = n_objects.saturating_sub(n100 + n50 + misses),
                (Some(_), None, None) => {
                    let n_remaining = n_remaining - n300;

                    let raw_n100 = target_total - f64::from(n_remaining + 6 * n300);
                    let min_n100 = n_remaining.min(raw_n100.floor().max(0.0) as u32);
                    let max_n100 = n_remaining.min(raw_n100.ceil().max(0.0) as u32);

                    (n100, n50) = closest(acc, min_n100..=max_n100, |new100| {
                        let new50 = n_remaining - new100;

                        ((new100, new50), accuracy(n300, new100, new50, misses))
                    })
                    .unwrap_or((0, n_remaining));
                }
                (None, Some(_), None) => {
                    let n_remaining = n_remaining - n100;

                    let raw_n300 = (target_total - f64::from(n_remaining + 2 * n100)) / 5.0;
                    let min_n300 = n_remaining.min(raw_n300.floor().max(0.0) as u32);
                    let max_n300 = n_remaining.min(raw_n300.ceil().max(0.0) as u32);

                    (n300, n50) = closest(acc, min_n300..=max_n300, |new300| {
                        let new50 = n_remaining - new300;

                        ((new300, new50), accuracy(new300, n100, new50, misses))
                    })
                    .unwrap_or((0, n_remaining));
                }
                (None, None, Some(_)) => {
                    let n_remaining = n_remaining - n50;

                    let raw_n300 = (target_total + f64::from(2 * misses + n50)
                        - f64::from(2 * n_objects))
                        / 4.0;

                    let min_n300 = n_remaining.min(raw_n300.floor().max(0.0) as u32);
                    let max_n300 = n_remaining.min(raw_n300.ceil().max(0.0) as u32);

                    (n300, n100) = closest(acc, min_n300..=max_n300, |new300| {
                        let new100 = n_remaining - new300;

                        ((new300, new100), accuracy(new300, new100, n50, misses))
                    })
                    .unwrap_or((0, n_remaining));
                }
                (None, None, None) => {
                    let mut best_dist = f64::MAX;

                    let raw_n300 = (target_total - f64::from(n_remaining)) / 5.0;
                    let min_n300 = n_remaining.min(raw_n300.floor().max(0.0) as u32);
                    let max_n300 = n_remaining.min(raw_n300.ceil().max(0.0) as u32);

                    for new300 in min_n300..=max_n300 {
                        let raw_n100 = target_total - f64::from(n_remaining + 5 * new300);
                        let min_n100 = (raw_n100.floor().max(0.0) as u32).min(n_remaining - new300);
                        let max_n100 = (raw_n100.ceil().max(0.0) as u32).min(n_remaining - new300);

                        for new100 in min_n100..=max_n100 {
                            let new50 = n_remaining - new300 - new100;
                            let curr_dist = (acc - accuracy(new300, new100, new50, misses)).abs();

                            if curr_dist < best_dist {
                                best_dist = curr_dist;
                                n300 = new300;
                                n100 = new100;
                                n50 = new50;
                            }
                        }
                    }

                    match priority {
                        HitResultPriority::BestCase => {
                            // Shift n50 to n100 by sacrificing n300
                            let n = n300.min(n50 / 4);
                            n300 -= n;
                            n100 += 5 * n;
                            n50 -= 4 * n;
                        }
                        HitResultPriority::WorstCase => {
                            // Shift n100 to n50 by gaining n300
                            let n = n100 / 5;
                            n300 += n;
                            n100 -= 5 * n;
                            n50 += 4 * n;
                        }
                    }
                }
            }
        } else {
            let remaining = n_objects.saturating_sub(n300 + n100 + n50 + misses);

            match priority {
                HitResultPriority::BestCase => match (self.n300, self.n100, self.n50) {
                    (None, ..) => n300 = remaining,
                    (_, None, _) => n100 = remaining,
                    (.., None) => n50 = remaining,
                    _ => n300 += remaining,
                },
                HitResultPriority::WorstCase => match (self.n50, self.n100, self.n300) {
                    (None, ..) => n50 = remaining,
                    (_, None, _) => n100 = remaining,
                    (.., None) => n300 = remaining,
                    _ => n50 += remaining,
                },
            }
        }

        let max_possible_combo = max_combo.saturating_sub(misses);

        let max_combo = self
            .combo
            .map_or(max_possible_combo, |combo| combo.min(max_possible_combo));

        OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        }
    }

    /// Calculate all performance related values.
    pub fn calculate(self) -> OsuPerformanceAttributes {
        let state = self.generate_state();
        let effective_miss_count = calculate_effective_misses(&self.attrs, &state);

        #[cfg(feature = "tracing")]
        tracing::trace!(?state, effective_miss_count, "Calculating osu!standard performance");

        OsuPerformanceCalculator::new(self.attrs, self.mods, state, effective_miss_count)
            .calculate()
    }
}

impl From<OsuDifficultyAttributes> for OsuPerformance {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<OsuPerformanceAttributes> for OsuPerformance {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}

/// While generating remaining hitresults, decide how they should be distributed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HitResultPriority {
    /// Prioritize good hitresults over bad ones
    #[default]
    BestCase,
    /// Prioritize bad hitresults over good ones
    WorstCase,
}

/// Misses plus an estimate of slider breaks based on the score's combo.
pub fn calculate_effective_misses(attrs: &OsuDifficultyAttributes, state: &OsuScoreState) -> f64 {
    // * Guess the number of misses + slider breaks from combo
    let mut combo_based_miss_count = 0.0;

    if attrs.n_sliders > 0 {
        let full_combo_threshold = f64::from(attrs.max_combo) - 0.1 * f64::from(attrs.n_sliders);

        if f64::from(state.max_combo) < full_combo_threshold {
            combo_based_miss_count = full_combo_threshold / f64::from(state.max_combo).max(1.0);
        }
    }

    // * Clamp miss count since it's derived from combo and can be higher than total hits and that breaks some calculations
    combo_based_miss_count = combo_based_miss_count.min(f64::from(state.total_hits()));

    combo_based_miss_count.max(f64::from(state.misses))
}

/// Pick the candidate whose accuracy is closest to `acc`.
fn closest<T>(
    acc: f64,
    candidates: impl Iterator<Item = u32>,
    mut f: impl FnMut(u32) -> (T, f64),
) -> Option<T> {
    let mut best = None;
    let mut best_dist = f64::MAX;

    for candidate in candidates {
        let (value, candidate_acc) = f(candidate);
        let dist = (acc - candidate_acc).abs();

        if dist < best_dist {
            best_dist = dist;
            best = Some(value);
        }
    }

    best
}

fn accuracy(n300: u32, n100: u32, n50: u32, misses: u32) -> f64 {
    OsuScoreState {
        max_combo: 0,
        n300,
        n100,
        n50,
        misses,
    }
    .accuracy()
}
