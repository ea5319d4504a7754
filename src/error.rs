use thiserror::Error;

/// Engine errors. All are synchronous and leave the input state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rating outside the four-valued 1..=4 scale. User input error.
    #[error("invalid rating {0}: expected 1 (again) through 4 (easy)")]
    InvalidRating(u8),

    /// Malformed scheduling parameters. Configuration error, fail fast.
    #[error("invalid scheduler config: {0}")]
    InvalidConfig(&'static str),
}
