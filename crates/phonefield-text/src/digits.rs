//! Digit extraction and char-offset helpers.
//!
//! All offsets in phonefield are counted in `char`s, never bytes, so that
//! decorations and prefixes may contain non-ASCII text (e.g. a non-breaking
//! space or an en dash) without corrupting cursor arithmetic.
//!
//! # Invariants
//!
//! 1. [`extract_digits`] preserves the relative order of digits.
//! 2. [`extract_digits`] is idempotent: extracting from its own output yields
//!    the same string.
//! 3. [`skip_chars`] saturates: skipping more chars than exist yields `""`.

use std::borrow::Cow;

/// Whether `c` counts as a phone-number digit (ASCII `0`..=`9`).
#[inline]
#[must_use]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Whether `s` contains any numeric character.
///
/// Wider than [`is_digit`]: insertion text holding *any* Unicode numeric
/// char (decimal digits in every script, but also `½`, `²` or `Ⅻ`) is
/// rejected, so decoration can never be read back as part of the number.
#[must_use]
pub fn contains_digit(s: &str) -> bool {
    s.chars().any(char::is_numeric)
}

/// Whether `s` is non-empty and consists only of ASCII digits.
#[must_use]
pub fn is_digits_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_digit)
}

/// Drop every non-digit character, keeping digits in order.
///
/// Borrows the input when it is already digits-only.
///
/// ```
/// use phonefield_text::digits::extract_digits;
///
/// assert_eq!(extract_digits("+7 (916) 123-45-67"), "79161234567");
/// assert_eq!(extract_digits("(   ) -"), "");
/// ```
#[must_use]
pub fn extract_digits(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_digit) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|&c| is_digit(c)).collect())
}

/// Number of chars in `s`.
#[inline]
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The suffix of `s` after its first `n` chars.
#[must_use]
pub fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[byte..],
        None => "",
    }
}
