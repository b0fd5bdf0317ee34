use crate::{
    model::{beatmap::Beatmap, mods::GameMods},
    osu::{attributes::OsuDifficultyAttributes, convert::convert_objects},
};

pub use self::error::DifficultyError;

use self::{
    object::DifficultyObjects,
    scaling_factor::ScalingFactor,
    skills::{OsuSkills, Skill},
};

mod error;
pub mod movement;
pub mod object;
pub(crate) mod scaling_factor;
pub mod skills;

const DIFFICULTY_MULTIPLIER: f64 = 0.0675;

const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

/// Difficulty calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use rosu_fc_pp::{model::hit_object::{HitObject, Pos}, Beatmap, GameMod, OsuDifficulty};
///
/// let map = Beatmap::new(vec![
///     HitObject::circle(Pos::new(0.0, 0.0), 0.0),
///     HitObject::circle(Pos::new(200.0, 0.0), 250.0),
///     HitObject::circle(Pos::new(200.0, 200.0), 500.0),
/// ])
/// .od(8.0);
///
/// let attrs = OsuDifficulty::new()
///     .mods(GameMod::DoubleTime)
///     .calculate(&map)
///     .unwrap();
///
/// assert!(attrs.aim > 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct OsuDifficulty {
    mods: GameMods,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl OsuDifficulty {
    /// Create a new difficulty calculator.
    pub const fn new() -> Self {
        Self {
            mods: GameMods::NONE,
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify mods.
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    ///
    /// | Minimum | Maximum |
    /// | :-----: | :-----: |
    /// | 0.01    | 100     |
    pub fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate.clamp(0.01, 100.0));

        self
    }

    /// Perform the difficulty calculation.
    pub fn calculate(&self, map: &Beatmap) -> Result<OsuDifficultyAttributes, DifficultyError> {
        let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(self, map)?;
        DifficultyValues::eval(&mut attrs, &skills);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            aim = attrs.aim,
            speed = attrs.speed,
            flashlight = attrs.flashlight,
            "Finished osu!standard difficulty calculation"
        );

        Ok(attrs)
    }

    pub(crate) const fn get_mods(&self) -> GameMods {
        self.mods
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }
}

pub struct DifficultyValues {
    pub skills: OsuSkills,
    pub attrs: OsuDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(
        difficulty: &OsuDifficulty,
        map: &Beatmap,
    ) -> Result<Self, DifficultyError> {
        let mods = difficulty.get_mods();
        let clock_rate = difficulty.get_clock_rate();
        let take = difficulty.get_passed_objects();

        let map_attrs = map.attributes().mods(mods).clock_rate(clock_rate).build();
        let scaling_factor = ScalingFactor::new(map_attrs.cs);

        let mut attrs = OsuDifficultyAttributes {
            ar: map_attrs.ar,
            hp: map_attrs.hp,
            od: map_attrs.od,
            ..Default::default()
        };

        let osu_objects = convert_objects(&map.hit_objects, &scaling_factor, take, &mut attrs);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            n_objects = osu_objects.len(),
            clock_rate,
            ?mods,
            "Calculating osu!standard difficulty"
        );

        let diff_objects =
            DifficultyObjects::from_osu_objects(&osu_objects, clock_rate, &scaling_factor)?;

        let mut skills = OsuSkills::new(mods, &scaling_factor, &map_attrs);

        // The first hit object has no difficulty object
        for curr in diff_objects.iter() {
            if let Err(err) = skills.process(curr, &diff_objects) {
                #[cfg(feature = "tracing")]
                tracing::error!(idx = curr.idx, "Aborting difficulty calculation: {err}");

                return Err(err);
            }
        }

        Ok(Self { skills, attrs })
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut OsuDifficultyAttributes, skills: &OsuSkills) {
        attrs.aim = skills.aim.difficulty_value();
        attrs.speed = skills.speed.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        attrs.flashlight = skills.flashlight.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        attrs.speed_note_count = skills.speed.relevant_note_count();
    }
}
