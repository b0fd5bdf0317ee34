use thiserror::Error;

use crate::util::root_finding::RootError;

/// Failures while preparing or evaluating difficulty objects.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum DifficultyError {
    /// A difficulty object's strain time was not a positive finite number.
    #[error("strain time of object {idx} must be positive and finite, got {strain_time}")]
    InvalidStrainTime { idx: usize, strain_time: f64 },
    /// A hit object starts before its predecessor.
    #[error("hit object {idx} starts before the previous hit object")]
    UnsortedObjects { idx: usize },
    /// The cursor model's radius crossing could not be solved.
    #[error("failed to determine when the cursor crosses the radius of object {idx}")]
    CursorCrossing {
        idx: usize,
        #[source]
        source: RootError,
    },
}
