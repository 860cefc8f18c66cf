//! Errors raised by programmatic writes to a [`PhoneNumberInput`](crate::PhoneNumberInput).

use thiserror::Error;

/// A programmatic input was rejected.
///
/// Typing never produces this: an overflowing keystroke is reverted in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The number has more digits than the configured maximum.
    #[error("{count} digits exceed the maximum of {max}")]
    TooManyDigits { count: usize, max: usize },
}
