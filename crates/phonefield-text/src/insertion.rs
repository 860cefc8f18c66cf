//! Insertion rules: decoration text placed before a given digit.
//!
//! An [`InsertionTable`] is an immutable, cheaply clonable sequence of
//! [`InsertionRule`]s. Tables are validated once when built and shared by
//! reference afterwards; there is no way to mutate a table in place.
//!
//! # Invariants
//!
//! 1. No rule's text contains a numeric character.
//! 2. Rule order is preserved exactly as given; rules sharing a position
//!    fire in that order.

use std::fmt;
use std::sync::Arc;

use crate::digits::contains_digit;
use crate::error::ConfigError;

/// Decoration text emitted immediately before the digit at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertionRule {
    position: usize,
    text: String,
}

impl InsertionRule {
    /// Create a rule, rejecting text that contains a digit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DigitInInsertion`] if `text` holds any numeric
    /// character. This is stricter than decimal digits alone: fractions
    /// (`½`), superscripts (`²`) and Roman numerals (`Ⅻ`) are rejected too.
    pub fn new(position: usize, text: impl Into<String>) -> Result<Self, ConfigError> {
        let text = text.into();
        if contains_digit(&text) {
            return Err(ConfigError::DigitInInsertion { position, text });
        }
        Ok(Self { position, text })
    }

    /// The 0-based digit index this rule fires before.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The decoration text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, immutable set of insertion rules.
///
/// # Example
///
/// ```
/// use phonefield_text::InsertionTable;
///
/// let table = InsertionTable::from_pairs([(0, "("), (3, ") "), (6, "-"), (8, "-")])?;
/// assert_eq!(table.len(), 4);
/// assert!(InsertionTable::from_pairs([(3, " 1 ")]).is_err());
/// # Ok::<(), phonefield_text::ConfigError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct InsertionTable {
    rules: Arc<[InsertionRule]>,
}

impl InsertionTable {
    /// A table with no rules: digits are emitted undecorated.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from already-validated rules.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = InsertionRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Build a table from `(position, text)` pairs, validating each.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::DigitInInsertion`] encountered.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(position, text)| InsertionRule::new(position, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// `916 123 45 67`
    #[must_use]
    pub fn spaced() -> Self {
        Self::from_static(&[(3, " "), (6, " "), (8, " ")])
    }

    /// `(916) 123 45 67`
    #[must_use]
    pub fn braces() -> Self {
        Self::from_static(&[(0, "("), (3, ") "), (6, " "), (8, " ")])
    }

    /// `(916) 123-45-67`
    #[must_use]
    pub fn braces_and_dashes() -> Self {
        Self::from_static(&[(0, "("), (3, ") "), (6, "-"), (8, "-")])
    }

    // Presets are digit-free literals, so validation cannot fail.
    fn from_static(pairs: &[(usize, &str)]) -> Self {
        Self::new(pairs.iter().map(|&(position, text)| InsertionRule {
            position,
            text: text.to_owned(),
        }))
    }

    /// Rules in table order.
    #[must_use]
    pub fn rules(&self) -> &[InsertionRule] {
        &self.rules
    }

    /// Rules that fire before the digit at `position`, in table order.
    pub fn at(&self, position: usize) -> impl Iterator<Item = &InsertionRule> {
        self.rules.iter().filter(move |r| r.position == position)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for InsertionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|r| (r.position, &r.text)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a InsertionTable {
    type Item = &'a InsertionRule;
    type IntoIter = std::slice::Iter<'a, InsertionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
