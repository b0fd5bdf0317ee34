//! Library to calculate difficulty and performance attributes for [osu!]standard maps
//! based on full combo probability.
//!
//! ## Description
//!
//! Instead of summing up weighted strain peaks, the aim rating of a map is the
//! skill level at which a player hits every object with a combined probability
//! of 50%. Each object's raw difficulty is derived from how far the cursor has
//! to travel and how long it stays within the object's radius, assuming the
//! cursor moves along a minimum jerk trajectory.
//!
//! Speed and flashlight keep their strain based approach while the
//! performance calculation estimates the player's hit deviation from the
//! amount of 300s and scales every skill with it.
//!
//! ## Usage
//!
//! ```
//! use rosu_fc_pp::{
//!     model::hit_object::{HitObject, Pos, Slider},
//!     Beatmap, GameMod, OsuDifficulty, OsuPerformance,
//! };
//!
//! let map = Beatmap::new(vec![
//!     HitObject::circle(Pos::new(64.0, 192.0), 1000.0),
//!     HitObject::circle(Pos::new(256.0, 192.0), 1250.0),
//!     HitObject::slider(
//!         Pos::new(448.0, 192.0),
//!         1500.0,
//!         Slider {
//!             end_pos: Pos::new(448.0, 32.0),
//!             duration: 400.0,
//!             repeats: 0,
//!             ticks_per_span: 1,
//!         },
//!     ),
//!     HitObject::circle(Pos::new(256.0, 32.0), 2100.0),
//! ])
//! .ar(9.0)
//! .od(8.0);
//!
//! // Calculate difficulty attributes
//! let diff_attrs = OsuDifficulty::new()
//!     .mods(GameMod::Hidden)
//!     .calculate(&map)
//!     .unwrap();
//!
//! let aim = diff_attrs.aim;
//!
//! // Calculate performance attributes, re-using the difficulty attributes.
//! // **Note** that this should only be done if the map, mods, and amount
//! // of passed objects stay the same.
//! let perf_attrs = OsuPerformance::new(diff_attrs)
//!     .mods(GameMod::Hidden)
//!     .combo(5)
//!     .accuracy(98.0)
//!     .calculate();
//!
//! println!("Aim: {aim} | PP: {}", perf_attrs.pp());
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Enables the `tracing` feature |
//! | `tracing` | Calculation progress is logged through `tracing::debug` and `tracing::trace`. Numerical failures that are recovered from, e.g. an aim skill level that could not be solved for, are logged as well. If this feature is not enabled, they are silently ignored. | [`tracing`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    model::{
        beatmap::Beatmap,
        mods::{GameMod, GameMods},
    },
    osu::{
        DifficultyError, HitResultPriority, OsuDifficulty, OsuDifficultyAttributes,
        OsuPerformance, OsuPerformanceAttributes, OsuScoreState,
    },
    util::root_finding::RootError,
};

/// Types for osu!standard calculations.
pub mod osu;

/// Types used in and around this crate.
pub mod model;

mod util;
