use thiserror::Error;

/// Failure modes of the date normalizer.
///
/// The scheduler pipeline never surfaces these to callers: a bill whose
/// stored date fails to normalize is excluded from the projected output.
/// The enum exists so the HTTP layer can reuse the same parser for
/// write-time validation and report what was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The stored value was empty or whitespace.
    #[error("date value is empty")]
    Empty,

    /// The value matched none of the accepted representations.
    #[error("unrecognized date representation: {0:?}")]
    Unrecognized(String),

    /// A `YYYY-MM-DD` value with components that do not form a real date.
    #[error("calendar components out of range: {year:04}-{month:02}-{day:02}")]
    OutOfRange { year: i32, month: u32, day: u32 },
}
