//! The phone-number formatter.
//!
//! [`format`] turns a digit string into its decorated form under a
//! [`FormatConfig`], returning the text together with the cursor offsets
//! that sit on digit or prefix boundaries and the char ranges that came
//! from decoration.
//!
//! # Algorithm
//!
//! The accumulator starts as the prefix (or empty) and its length is
//! recorded as valid. For each digit at index `i`, every rule with
//! `position == i` appends its text (in table order) and records the new
//! length, then the digit is appended and the new length recorded. Rules
//! positioned at or after the digit count never fire.
//!
//! # Invariants
//!
//! 1. Pure: equal inputs give equal outputs.
//! 2. `char_len(text) == prefix_len + Σ fired rule lengths + char_len(digits)`.
//! 3. Every recorded offset is `<= char_len(text)`, and `char_len(text)` is
//!    itself recorded.

use std::ops::Range;

use smallvec::SmallVec;

use crate::config::FormatConfig;
use crate::digits::char_len;
use crate::selection::ValidSelectionSet;

/// Where a decorated range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// The fixed prefix.
    Prefix,
    /// An insertion rule.
    Insertion,
}

/// A char range of the formatted text that is not a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decoration {
    /// Char range within the formatted text.
    pub range: Range<usize>,
    /// Origin of the range.
    pub kind: DecorationKind,
}

/// Output of [`format`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedNumber {
    /// The formatted text.
    pub text: String,
    /// Cursor offsets on digit or prefix boundaries.
    pub valid_positions: ValidSelectionSet,
    /// Decorated char ranges, in text order. Empty rule texts produce no
    /// range.
    pub decorations: SmallVec<[Decoration; 8]>,
}

impl FormattedNumber {
    /// Length of [`text`](Self::text) in chars.
    #[must_use]
    pub fn char_len(&self) -> usize {
        // The last recorded offset is always the full length.
        self.valid_positions
            .last()
            .unwrap_or_else(|| char_len(&self.text))
    }
}

/// Format `digits` under `config`.
///
/// `digits` is expected to hold only ASCII digits; callers extract them with
/// [`extract_digits`](crate::digits::extract_digits). Other characters are
/// emitted verbatim and counted as digits.
///
/// ```
/// use phonefield_text::{FormatConfig, InsertionTable, format};
///
/// let config = FormatConfig::builder()
///     .prefix("+7 ")
///     .insertions(InsertionTable::braces_and_dashes())
///     .build()?;
/// let out = format("9161234567", &config);
/// assert_eq!(out.text, "+7 (916) 123-45-67");
/// assert!(out.valid_positions.contains(3));
/// assert!(!out.valid_positions.contains(8));
/// # Ok::<(), phonefield_text::ConfigError>(())
/// ```
#[must_use]
pub fn format(digits: &str, config: &FormatConfig) -> FormattedNumber {
    let mut out = FormattedNumber::default();
    let mut len = 0usize;

    if let Some(prefix) = config.prefix() {
        out.text.push_str(prefix);
        len = char_len(prefix);
        push_decoration(&mut out.decorations, 0..len, DecorationKind::Prefix);
    }
    out.valid_positions.insert(len);

    for (i, digit) in digits.chars().enumerate() {
        for rule in config.insertions().at(i) {
            let start = len;
            out.text.push_str(rule.text());
            len += char_len(rule.text());
            push_decoration(&mut out.decorations, start..len, DecorationKind::Insertion);
            out.valid_positions.insert(len);
        }
        out.text.push(digit);
        len += 1;
        out.valid_positions.insert(len);
    }

    out
}

fn push_decoration(
    decorations: &mut SmallVec<[Decoration; 8]>,
    range: Range<usize>,
    kind: DecorationKind,
) {
    if !range.is_empty() {
        decorations.push(Decoration { range, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insertion::InsertionTable;
    use proptest::prelude::*;

    fn dashed_ru() -> FormatConfig {
        FormatConfig::builder()
            .prefix("+7 ")
            .insertions(InsertionTable::braces_and_dashes())
            .build()
            .unwrap()
    }

    #[test]
    fn full_number_with_braces_and_dashes() {
        let out = format("9161234567", &dashed_ru());
        assert_eq!(out.text, "+7 (916) 123-45-67");
        assert_eq!(out.char_len(), 18);
    }

    #[test]
    fn valid_positions_skip_decoration_interiors() {
        let out = format("9161", &dashed_ru());
        assert_eq!(out.text, "+7 (916) 1");
        // prefix end, "(", 9, 1, 6, ") ", 1
        assert_eq!(out.valid_positions.as_slice(), &[3, 4, 5, 6, 7, 9, 10]);
    }

    #[test]
    fn prefix_only_when_no_digits() {
        let out = format("", &dashed_ru());
        assert_eq!(out.text, "+7 ");
        assert_eq!(out.valid_positions.as_slice(), &[3]);
        assert_eq!(
            out.decorations.as_slice(),
            &[Decoration {
                range: 0..3,
                kind: DecorationKind::Prefix
            }]
        );
    }

    #[test]
    fn no_prefix_records_zero() {
        let config = FormatConfig::builder()
            .no_prefix()
            .insertions(InsertionTable::spaced())
            .build()
            .unwrap();
        let out = format("916123", &config);
        assert_eq!(out.text, "916 123");
        assert_eq!(out.valid_positions.first(), Some(0));
    }

    #[test]
    fn trailing_rule_does_not_fire() {
        // Position 3 needs a fourth digit.
        let out = format("916", &dashed_ru());
        assert_eq!(out.text, "+7 (916");
    }

    #[test]
    fn rules_at_same_position_fire_in_order() {
        let table = InsertionTable::from_pairs([(1, ")"), (1, " "), (1, "-")]).unwrap();
        let config = FormatConfig::builder()
            .no_prefix()
            .insertions(table)
            .build()
            .unwrap();
        let out = format("12", &config);
        assert_eq!(out.text, "1) -2");
        assert_eq!(out.valid_positions.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn decorations_mark_insertions() {
        let out = format("91612", &dashed_ru());
        let ranges: Vec<_> = out
            .decorations
            .iter()
            .map(|d| (d.range.clone(), d.kind))
            .collect();
        assert_eq!(
            ranges,
            vec![
                (0..3, DecorationKind::Prefix),
                (3..4, DecorationKind::Insertion),
                (7..9, DecorationKind::Insertion),
            ]
        );
    }

    #[test]
    fn non_ascii_decorations_count_chars() {
        let table = InsertionTable::from_pairs([(2, "\u{2013}")]).unwrap();
        let config = FormatConfig::builder()
            .prefix("\u{00a0}")
            .insertions(table)
            .build()
            .unwrap();
        let out = format("1234", &config);
        assert_eq!(out.text, "\u{00a0}12\u{2013}34");
        assert_eq!(out.char_len(), 6);
        assert_eq!(out.valid_positions.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_rule_text_adds_no_decoration() {
        let table = InsertionTable::from_pairs([(1, "")]).unwrap();
        let config = FormatConfig::builder()
            .no_prefix()
            .insertions(table)
            .build()
            .unwrap();
        let out = format("12", &config);
        assert_eq!(out.text, "12");
        assert!(out.decorations.is_empty());
        assert_eq!(out.valid_positions.as_slice(), &[0, 1, 2]);
    }

    fn arb_table() -> impl Strategy<Value = InsertionTable> {
        prop::collection::vec((0usize..12, "[ ()\\-.]{0,3}"), 0..6).prop_map(|pairs| {
            InsertionTable::from_pairs(pairs).expect("strategy emits digit-free text")
        })
    }

    proptest! {
        #[test]
        fn format_is_deterministic(digits in "[0-9]{0,14}", table in arb_table()) {
            let config = FormatConfig::builder().insertions(table).build().unwrap();
            prop_assert_eq!(format(&digits, &config), format(&digits, &config));
        }

        #[test]
        fn length_accounting(
            digits in "[0-9]{0,14}",
            prefix in "[+ ]{0,3}",
            table in arb_table(),
        ) {
            let config = FormatConfig::builder()
                .prefix(prefix.clone())
                .insertions(table.clone())
                .build()
                .unwrap();
            let out = format(&digits, &config);
            let n = digits.len();
            let fired: usize = table
                .rules()
                .iter()
                .filter(|r| r.position() < n)
                .map(|r| r.text().chars().count())
                .sum();
            prop_assert_eq!(out.text.chars().count(), prefix.chars().count() + fired + n);
            prop_assert_eq!(out.char_len(), out.text.chars().count());
        }

        #[test]
        fn digits_survive_formatting(digits in "[0-9]{0,14}", table in arb_table()) {
            let config = FormatConfig::builder().insertions(table).build().unwrap();
            let out = format(&digits, &config);
            let prefix_len = config.prefix_len();
            let recovered = crate::digits::extract_digits(
                crate::digits::skip_chars(&out.text, prefix_len),
            );
            prop_assert_eq!(recovered, digits.as_str());
        }
    }
}
