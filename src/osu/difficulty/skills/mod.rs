use crate::model::{beatmap::BeatmapAttributes, mods::GameMods};

use self::{aim::Aim, flashlight::Flashlight, speed::Speed};

use super::{
    error::DifficultyError,
    object::{DifficultyObjects, OsuDifficultyObject},
    scaling_factor::ScalingFactor,
    HD_FADE_IN_DURATION_MULTIPLIER,
};

pub mod aim;
pub mod flashlight;
pub mod speed;
pub mod strain;

/// A skill that accumulates difficulty object by object.
pub trait Skill {
    /// Process the next difficulty object.
    fn process(
        &mut self,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<(), DifficultyError>;

    /// The difficulty of all processed objects combined.
    fn difficulty_value(&self) -> f64;
}

pub struct OsuSkills {
    pub aim: Aim,
    pub speed: Speed,
    pub flashlight: Flashlight,
}

impl OsuSkills {
    const PREEMPT_MIN: f64 = 450.0;

    pub fn new(mods: GameMods, scaling_factor: &ScalingFactor, map_attrs: &BeatmapAttributes) -> Self {
        let clock_rate = map_attrs.clock_rate;
        let hit_window = map_attrs.hit_windows.od;
        let time_preempt = map_attrs.hit_windows.ar;

        // Fade-in durations are defined in map time
        let unscaled_preempt = time_preempt * clock_rate;

        let time_fade_in = if mods.hd() {
            unscaled_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (unscaled_preempt / Self::PREEMPT_MIN).min(1.0)
        } / clock_rate;

        Self {
            aim: Aim::new(),
            speed: Speed::new(hit_window),
            flashlight: Flashlight::new(mods, scaling_factor.radius, time_preempt, time_fade_in),
        }
    }

    pub fn process(
        &mut self,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<(), DifficultyError> {
        self.aim.process(curr, objects)?;
        self.speed.process(curr, objects)?;
        self.flashlight.process(curr, objects)?;

        Ok(())
    }
}
