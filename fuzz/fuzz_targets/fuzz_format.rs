#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use phonefield_text::digits::{extract_digits, skip_chars};
use phonefield_text::{FormatConfig, InsertionTable, format};

#[derive(Debug, Arbitrary)]
struct Input {
    prefix: String,
    rules: Vec<(u8, String)>,
    typed: String,
}

fuzz_target!(|input: Input| {
    let rules = input
        .rules
        .into_iter()
        .map(|(position, text)| (usize::from(position % 16), text));
    // Digit-bearing rule text is rejected up front.
    let Ok(table) = InsertionTable::from_pairs(rules) else {
        return;
    };
    if input.prefix.chars().any(char::is_numeric) {
        return;
    }
    let Ok(config) = FormatConfig::builder()
        .prefix(input.prefix)
        .insertions(table)
        .build()
    else {
        return;
    };

    let digits = extract_digits(&input.typed);
    let out = format(&digits, &config);

    let len = out.text.chars().count();
    assert_eq!(out.char_len(), len);
    assert!(out.valid_positions.iter().all(|p| p <= len));
    assert_eq!(out.valid_positions.first(), Some(config.prefix_len()));
    assert_eq!(
        extract_digits(skip_chars(&out.text, config.prefix_len())),
        digits
    );
    for d in &out.decorations {
        assert!(d.range.end <= len);
    }
});
