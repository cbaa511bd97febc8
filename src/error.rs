//! Error types for the era5-density crate.
use crate::keys::Variable;
use thiserror::Error;

/// Error type for the crate.
///
/// Every failure in this crate is a problem with the caller's input, and it is always reported
/// before any computation is done, so there is never a partial result.
#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum InvalidInputError {
    /// A temperature, pressure, or humidity value was below zero.
    #[error("negative {variable} value {value} at index {index}, please check the data")]
    NegativeValue {
        /// The offending column.
        variable: Variable,
        /// Position of the first negative value in that column.
        index: usize,
        /// The value itself.
        value: f64,
    },
    /// A column is not the same length as the series it should be aligned with.
    #[error("{variable} has {found} values, expected {expected}")]
    LengthMismatch {
        /// The offending column.
        variable: Variable,
        /// Length of the reference column (temperature, or the time axis for a block).
        expected: usize,
        /// Length of the offending column.
        found: usize,
    },
    /// A column required to build records was never supplied.
    #[error("missing required column {0}")]
    MissingVariable(Variable),
    /// Some samples in a series carry a humidity value and some do not.
    #[error("humidity must be present for all samples or none, sample {index} disagrees")]
    MixedHumidity {
        /// Position of the first sample that disagrees with the first sample.
        index: usize,
    },
    /// A time offset could not be turned into a calendar timestamp.
    #[error("time offset {hours} hours at index {index} is out of range")]
    TimeOutOfRange {
        /// Position of the offset in the time axis.
        index: usize,
        /// The raw offset in hours.
        hours: f64,
    },
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, InvalidInputError>;
