pub use self::attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows};

use crate::{
    osu::{DifficultyError, OsuDifficulty, OsuDifficultyAttributes},
    GameMods,
};

use super::hit_object::HitObject;

mod attributes;

/// All beatmap data that is relevant for difficulty and performance
/// calculation.
///
/// Decoding `.osu` files is not part of this crate; hit objects are expected
/// to be sorted by start time with stacking already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Create a new [`Beatmap`] with all difficulty settings set to `5.0`.
    pub const fn new(hit_objects: Vec<HitObject>) -> Self {
        Self {
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            hit_objects,
        }
    }

    /// Specify the approach rate.
    pub const fn ar(mut self, ar: f32) -> Self {
        self.ar = ar;

        self
    }

    /// Specify the circle size.
    pub const fn cs(mut self, cs: f32) -> Self {
        self.cs = cs;

        self
    }

    /// Specify the health drain rate.
    pub const fn hp(mut self, hp: f32) -> Self {
        self.hp = hp;

        self
    }

    /// Specify the overall difficulty.
    pub const fn od(mut self, od: f32) -> Self {
        self.od = od;

        self
    }

    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Calculate the difficulty attributes without mods.
    ///
    /// Use [`OsuDifficulty`] to specify mods or other settings.
    pub fn difficulty(&self) -> Result<OsuDifficultyAttributes, DifficultyError> {
        OsuDifficulty::new().calculate(self)
    }

    /// Calculate the difficulty attributes for the given mods.
    pub fn difficulty_with_mods(
        &self,
        mods: impl Into<GameMods>,
    ) -> Result<OsuDifficultyAttributes, DifficultyError> {
        OsuDifficulty::new().mods(mods).calculate(self)
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
