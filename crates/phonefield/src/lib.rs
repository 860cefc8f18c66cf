#![forbid(unsafe_code)]

//! Phonefield: live phone-number formatting for single-line text inputs.
//!
//! The formatter lives in [`text`] and the editing controller in
//! [`widgets`]. Most users only need the [`prelude`].
//!
//! ```
//! use phonefield::prelude::*;
//!
//! let mut input = PhoneNumberInput::new(MemoryField::new(), FormatConfig::ru());
//! input.set_phone_number("916 123 45 67")?;
//! assert_eq!(input.formatted_phone_number(), "+7 (916) 123 45 67");
//! # Ok::<(), phonefield::widgets::InputError>(())
//! ```

pub use phonefield_text as text;
pub use phonefield_widgets as widgets;

#[cfg(feature = "tracing-json")]
pub mod logging;

pub use phonefield_text::{
    ConfigError, Decoration, DecorationKind, FormatConfig, FormatConfigBuilder, FormattedNumber,
    InsertionRule, InsertionTable, LengthValidator, PhoneNumberValidator, ValidSelectionSet,
    extract_digits, format,
};
pub use phonefield_widgets::{
    EdgeTriggered, EditSession, FnListener, InputError, MemoryField, PhoneNumberInput,
    PhoneNumberListener, TextField,
};

/// Common imports.
pub mod prelude {
    pub use phonefield_text::{
        ConfigError, FormatConfig, InsertionTable, PhoneNumberValidator, format,
    };
    pub use phonefield_widgets::{
        EdgeTriggered, FnListener, InputError, MemoryField, PhoneNumberInput,
        PhoneNumberListener, TextField,
    };
}
