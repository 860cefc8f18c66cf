//! Phone-number validity checks.
//!
//! Only fixed digit-count validation is provided. Anything smarter (number
//! plans, carrier lookups) can be plugged in through
//! [`PhoneNumberValidator`].

use crate::digits::is_digits_only;

/// Decides whether a digit string is a complete phone number.
pub trait PhoneNumberValidator {
    /// Whether `digits` is valid.
    fn validate(&self, digits: &str) -> bool;
}

impl<F> PhoneNumberValidator for F
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, digits: &str) -> bool {
        self(digits)
    }
}

/// Valid iff the string is exactly `required` ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthValidator {
    required: usize,
}

impl LengthValidator {
    /// Require exactly `required` digits.
    #[must_use]
    pub const fn new(required: usize) -> Self {
        Self { required }
    }

    /// The required digit count.
    #[must_use]
    pub const fn required(&self) -> usize {
        self.required
    }
}

impl PhoneNumberValidator for LengthValidator {
    fn validate(&self, digits: &str) -> bool {
        // Byte length equals char length once the string is ASCII digits.
        is_digits_only(digits) && digits.len() == self.required
    }
}
