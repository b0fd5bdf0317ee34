pub use self::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    difficulty::{DifficultyError, OsuDifficulty},
    performance::{HitResultPriority, OsuPerformance},
    score_state::OsuScoreState,
};

mod attributes;
mod convert;
mod object;
mod score_state;

/// Difficulty calculation and the skills it consists of.
pub mod difficulty;

/// Performance calculation.
pub mod performance;
