use crate::GameMods;

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in milliseconds.
    pub od: f64,
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    ar: f32,
    od: f32,
    cs: f32,
    hp: f32,
    mods: GameMods,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const OD_MIN: f64 = 80.0;
    const OD_AVG: f64 = 50.0;
    const OD_MAX: f64 = 20.0;

    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_AVG: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// All attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            mods: GameMods::NONE,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes.
    pub const fn map(mut self, map: &Beatmap) -> Self {
        self.ar = map.ar;
        self.od = map.od;
        self.cs = map.cs;
        self.hp = map.hp;

        self
    }

    /// Specify the approach rate.
    pub const fn ar(mut self, ar: f32) -> Self {
        self.ar = ar;

        self
    }

    /// Specify the overall difficulty.
    pub const fn od(mut self, od: f32) -> Self {
        self.od = od;

        self
    }

    /// Specify the circle size.
    pub const fn cs(mut self, cs: f32) -> Self {
        self.cs = cs;

        self
    }

    /// Specify the drain rate.
    pub const fn hp(mut self, hp: f32) -> Self {
        self.hp = hp;

        self
    }

    /// Specify the mods.
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Specify a custom clock rate.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let mods = self.mods;
        let clock_rate = self.clock_rate.unwrap_or_else(|| mods.clock_rate());

        let mod_mult = |val: f32| {
            if mods.hr() {
                (val * 1.4).min(10.0)
            } else if mods.ez() {
                val * 0.5
            } else {
                val
            }
        };

        let preempt = difficulty_range(
            f64::from(mod_mult(self.ar)),
            Self::PREEMPT_MIN,
            Self::PREEMPT_AVG,
            Self::PREEMPT_MAX,
        ) / clock_rate;

        let hit_window = difficulty_range(
            f64::from(mod_mult(self.od)),
            Self::OD_MIN,
            Self::OD_AVG,
            Self::OD_MAX,
        ) / clock_rate;

        HitWindows {
            ar: preempt,
            od: hit_window,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let mods = self.mods;
        let clock_rate = self.clock_rate.unwrap_or_else(|| mods.clock_rate());

        let hp = (f64::from(self.hp) * mods.od_ar_hp_multiplier()).min(10.0);

        let cs = if mods.hr() {
            (self.cs * 1.3).min(10.0)
        } else if mods.ez() {
            self.cs * 0.5
        } else {
            self.cs
        };

        let hit_windows = self.hit_windows();
        let HitWindows { ar, od } = hit_windows;

        let ar = if ar > Self::PREEMPT_AVG {
            (Self::PREEMPT_MIN - ar) / 120.0
        } else {
            (Self::PREEMPT_AVG - ar) / 150.0 + 5.0
        };

        let od = (Self::OD_MIN - od) / 6.0;

        BeatmapAttributes {
            ar,
            od,
            cs: f64::from(cs),
            hp,
            clock_rate,
            hit_windows,
        }
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}
