#![forbid(unsafe_code)]

//! Phone-number formatting for phonefield.
//!
//! This crate holds the pure half of phonefield: digit extraction,
//! insertion tables, the immutable [`FormatConfig`], the [`format`]
//! function, and validity checks. Nothing here touches a text widget.
//!
//! # Example
//!
//! ```
//! use phonefield_text::{FormatConfig, InsertionTable, extract_digits, format};
//!
//! let config = FormatConfig::builder()
//!     .prefix("+7 ")
//!     .insertions(InsertionTable::braces_and_dashes())
//!     .build()?;
//!
//! let typed = "+7 916123 4567";
//! let digits = extract_digits(&typed[config.prefix().map_or(0, str::len)..]);
//! assert_eq!(format(&digits, &config).text, "+7 (916) 123-45-67");
//! # Ok::<(), phonefield_text::ConfigError>(())
//! ```

pub mod config;
pub mod digits;
pub mod error;
pub mod format;
pub mod insertion;
pub mod selection;
pub mod validate;

pub use config::{
    COUNTRY_CODE_PREFIX_RU, FULL_NUMBER_DIGITS_COUNT, FormatConfig, FormatConfigBuilder,
};
pub use digits::extract_digits;
pub use error::ConfigError;
pub use format::{Decoration, DecorationKind, FormattedNumber, format};
pub use insertion::{InsertionRule, InsertionTable};
pub use selection::ValidSelectionSet;
pub use validate::{LengthValidator, PhoneNumberValidator};
