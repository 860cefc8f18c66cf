//! Errors raised while building or loading a [`FormatConfig`](crate::FormatConfig).
//!
//! Configuration errors are the only failures in the formatting layer. They
//! surface at construction time (builder, setter, or deserialization) and
//! never while the user is typing.

use thiserror::Error;

/// A format configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An insertion rule's text contains a digit, which would make the
    /// boundary between digits and decoration ambiguous.
    #[error("insertion text {text:?} at digit position {position} contains a digit")]
    DigitInInsertion { position: usize, text: String },
    /// `max_digits` must be positive.
    #[error("max digit count must be positive")]
    ZeroMaxDigits,
    /// `required_digits` must be positive.
    #[error("required digit count must be positive")]
    ZeroRequiredDigits,
    /// A TOML policy document could not be parsed.
    #[cfg(feature = "policy-config")]
    #[error("invalid TOML format policy: {0}")]
    Toml(String),
    /// A JSON policy document could not be parsed.
    #[cfg(feature = "policy-config")]
    #[error("invalid JSON format policy: {0}")]
    Json(String),
}
