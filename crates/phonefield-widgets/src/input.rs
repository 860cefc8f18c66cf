#![forbid(unsafe_code)]

//! The phone-number editing controller.
//!
//! [`PhoneNumberInput`] watches a [`TextField`], and after every user edit
//! rewrites the field into canonical form, repositions the cursor, and runs
//! validation.
//!
//! # Edit pass
//!
//! For each accepted change notification:
//!
//! 1. Text equal to the last snapshot is a no-op (spurious re-notification).
//! 2. Digits are extracted from the text after the prefix.
//! 3. Too many digits: the snapshot is restored verbatim with the cursor at
//!    its end.
//! 4. No digits: the field is cleared and the prefix re-applied.
//! 5. Otherwise the digits are formatted and the cursor is shifted by the
//!    length delta, saturating to `[0, len]`.
//! 6. A missing prefix is restored.
//! 7. The field is validated and the listener notified.
//!
//! # Invariants
//!
//! 1. Every programmatic write happens inside an [`ApplyScope`](crate::ApplyScope),
//!    so the widget's echo notifications are dropped.
//! 2. While a prefix is configured, the field never ends a pass without it.
//! 3. The listener fires exactly once per validation pass.
//! 4. `valid_selection_positions()` always describes the current layout; it
//!    is rebuilt on each reformat and never patched.
//!
//! # Example
//!
//! ```
//! use phonefield_text::{FormatConfig, InsertionTable};
//! use phonefield_widgets::{MemoryField, PhoneNumberInput};
//!
//! let config = FormatConfig::ru().with_insertions(InsertionTable::braces_and_dashes());
//! let mut input = PhoneNumberInput::new(MemoryField::new(), config);
//!
//! for digit in "9161234567".chars() {
//!     input.apply_user_edit(|field| field.type_str(&digit.to_string()));
//! }
//! assert_eq!(input.formatted_phone_number(), "+7 (916) 123-45-67");
//! assert!(input.is_valid_number());
//! assert_eq!(input.phone_number(), Some("9161234567"));
//! ```

use std::fmt;
use std::rc::Rc;

use phonefield_text::digits::{char_len, extract_digits, skip_chars};
use phonefield_text::{
    ConfigError, Decoration, FormatConfig, FormattedNumber, InsertionTable, LengthValidator,
    PhoneNumberValidator, ValidSelectionSet, format,
};
use smallvec::SmallVec;

use crate::error::InputError;
use crate::field::TextField;
use crate::listener::PhoneNumberListener;
use crate::session::EditSession;

enum ValidatorSlot {
    /// Tracks `required_digits` of the active config.
    Length(LengthValidator),
    Custom(Box<dyn PhoneNumberValidator>),
}

impl ValidatorSlot {
    fn validate(&self, digits: &str) -> bool {
        match self {
            Self::Length(v) => v.validate(digits),
            Self::Custom(v) => v.validate(digits),
        }
    }
}

/// Live formatter and validator for one phone-number field.
pub struct PhoneNumberInput<F: TextField> {
    field: F,
    config: FormatConfig,
    validator: ValidatorSlot,
    listener: Option<Box<dyn PhoneNumberListener>>,
    session: Rc<EditSession>,
    last_raw_text: String,
    last_selection_start: usize,
    observed_selection: usize,
    valid_positions: ValidSelectionSet,
    decorations: SmallVec<[Decoration; 8]>,
    phone_number: Option<String>,
    is_valid: bool,
}

impl<F: TextField> PhoneNumberInput<F> {
    /// Attach to `field` with a fresh [`EditSession`].
    ///
    /// When `config` has a prefix, the field is overwritten with it and the
    /// cursor placed at its end.
    pub fn new(field: F, config: FormatConfig) -> Self {
        Self::with_session(field, config, EditSession::new())
    }

    /// Attach to `field`, guarding writes with a caller-provided session.
    ///
    /// Share the session with the widget adapter so it can drop the echo
    /// notifications of programmatic writes.
    pub fn with_session(field: F, config: FormatConfig, session: Rc<EditSession>) -> Self {
        let validator = ValidatorSlot::Length(LengthValidator::new(config.required_digits()));
        let mut input = Self {
            field,
            config,
            validator,
            listener: None,
            session,
            last_raw_text: String::new(),
            last_selection_start: 0,
            observed_selection: 0,
            valid_positions: ValidSelectionSet::new(),
            decorations: SmallVec::new(),
            phone_number: None,
            is_valid: false,
        };
        {
            let _scope = input.session.enter();
            if let Some(prefix) = input.config.prefix() {
                input.field.replace_all(prefix);
                input.field.set_selection(input.config.prefix_len());
            }
            input.adopt_layout(format("", &input.config));
        }
        input.refresh_snapshot();
        input
    }

    // ------------------------------------------------------------------
    // Change notifications
    // ------------------------------------------------------------------

    /// Snapshot the field ahead of a user edit.
    ///
    /// Ignored while a programmatic rewrite is in flight.
    pub fn before_text_changed(&mut self) {
        if self.session.is_applying() {
            return;
        }
        self.refresh_snapshot();
    }

    /// Process the field's current content as a completed user edit.
    pub fn after_text_changed(&mut self) {
        let text = self.field.text().into_owned();
        self.on_text_changed(&text, self.last_selection_start);
    }

    /// Run one edit pass for `new_text`, the field content after a user
    /// edit, given the cursor offset from before the edit.
    ///
    /// Re-entrant calls made while a pass is running are ignored.
    pub fn on_text_changed(&mut self, new_text: &str, prior_selection_start: usize) {
        if !self.session.accept_notification() {
            tracing::trace!("ignoring re-entrant change notification");
            return;
        }
        let _scope = self.session.enter();
        let _span = tracing::debug_span!("phone_edit", prior_selection_start).entered();

        self.observed_selection = self.field.selection_start();

        if new_text != self.last_raw_text {
            let digits = extract_digits(skip_chars(new_text, self.config.prefix_len()));
            if digits.len() > self.config.max_digits() {
                self.reject_overflow(digits.len());
            } else if digits.is_empty() {
                self.clear_field();
            } else {
                self.apply_digits(&digits, prior_selection_start);
            }
        }

        self.ensure_prefix();
        self.validate_current_number();
        self.refresh_snapshot();
    }

    /// Run a user edit against the field, delivering the before/after
    /// notifications around it.
    pub fn apply_user_edit<R>(&mut self, edit: impl FnOnce(&mut F) -> R) -> R {
        self.before_text_changed();
        let out = edit(&mut self.field);
        self.after_text_changed();
        out
    }

    /// Focus changed. Gaining focus moves the cursor to the end.
    pub fn on_focus_change(&mut self, has_focus: bool) {
        if has_focus {
            let end = self.field.len();
            self.field.set_selection(end);
        }
    }

    /// Snap a cursor the user placed inside decoration text onto the next
    /// valid position. Returns the offset now in effect.
    pub fn on_selection_changed(&mut self, offset: usize) -> usize {
        let snapped = self.valid_positions.clamp(offset).min(self.field.len());
        if snapped != offset {
            self.field.set_selection(snapped);
        }
        snapped
    }

    // ------------------------------------------------------------------
    // Programmatic operations
    // ------------------------------------------------------------------

    /// Empty the field and re-apply the prefix as one logical edit, then
    /// validate.
    pub fn clear(&mut self) {
        let _scope = self.session.enter();
        self.clear_field();
        self.validate_current_number();
        self.refresh_snapshot();
    }

    /// Format `number` into the field with the cursor at the end.
    ///
    /// `number` is the national number without the prefix. Non-digits are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::TooManyDigits`] and leaves the field untouched
    /// if `number` has more than `max_digits` digits.
    pub fn set_phone_number(&mut self, number: &str) -> Result<(), InputError> {
        let digits = extract_digits(number);
        self.check_digit_count(digits.len())?;
        self.write_digits(&digits);
        Ok(())
    }

    /// Re-layout the current digits under the active configuration.
    ///
    /// Configuration setters take effect on the next edit; call this to
    /// apply them immediately.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::TooManyDigits`] and leaves the field untouched
    /// if the field's digits exceed `max_digits` under the active
    /// configuration, e.g. after removing a prefix that held digits.
    pub fn reformat(&mut self) -> Result<(), InputError> {
        let digits = self.current_digits();
        self.check_digit_count(digits.len())?;
        self.write_digits(&digits);
        Ok(())
    }

    /// Re-derive the digits from the field and validate them.
    pub fn validate_current_number(&mut self) -> bool {
        let digits = self.current_digits();
        self.validate_number(digits)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Register the listener, replacing any previous one, and run a
    /// validation pass so it learns the current state.
    pub fn set_listener(&mut self, listener: impl PhoneNumberListener + 'static) {
        self.listener = Some(Box::new(listener));
        self.validate_current_number();
    }

    /// Remove and return the listener.
    pub fn clear_listener(&mut self) -> Option<Box<dyn PhoneNumberListener>> {
        self.listener.take()
    }

    /// Replace the validator. The default checks for exactly
    /// `required_digits` digits.
    pub fn set_validator(&mut self, validator: impl PhoneNumberValidator + 'static) {
        self.validator = ValidatorSlot::Custom(Box::new(validator));
    }

    /// Go back to the digit-count validator.
    pub fn use_length_validator(&mut self) {
        self.validator =
            ValidatorSlot::Length(LengthValidator::new(self.config.required_digits()));
    }

    /// Replace the whole configuration.
    ///
    /// If the field no longer starts with the (new) prefix it is reset to the
    /// prefix alone.
    pub fn set_config(&mut self, config: FormatConfig) {
        if let ValidatorSlot::Length(v) = &mut self.validator {
            *v = LengthValidator::new(config.required_digits());
        }
        self.config = config;

        let _scope = self.session.enter();
        self.ensure_prefix();
        self.refresh_snapshot();
    }

    /// Set the prefix. `None` or `Some("")` removes it.
    pub fn set_prefix(&mut self, prefix: Option<&str>) {
        self.set_config(self.config.with_prefix(prefix));
    }

    /// Set the insertion table.
    pub fn set_insertions(&mut self, insertions: InsertionTable) {
        self.set_config(self.config.with_insertions(insertions));
    }

    /// Set the digit cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxDigits`] for zero.
    pub fn set_max_digits(&mut self, max_digits: usize) -> Result<(), ConfigError> {
        let config = self.config.with_max_digits(max_digits)?;
        self.set_config(config);
        Ok(())
    }

    /// Set the digit count the default validator requires.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroRequiredDigits`] for zero.
    pub fn set_required_digits(&mut self, required_digits: usize) -> Result<(), ConfigError> {
        let config = self.config.with_required_digits(required_digits)?;
        self.set_config(config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Digits from the last validation pass, or `None` before the first.
    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Outcome of the last validation pass.
    #[must_use]
    pub fn is_valid_number(&self) -> bool {
        self.is_valid
    }

    /// Raw field content, decorations included.
    #[must_use]
    pub fn formatted_phone_number(&self) -> String {
        self.field.text().into_owned()
    }

    /// Cursor offsets on digit or prefix boundaries of the current layout.
    #[must_use]
    pub fn valid_selection_positions(&self) -> &ValidSelectionSet {
        &self.valid_positions
    }

    /// Char ranges of the current layout that came from the prefix or an
    /// insertion rule.
    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Cursor offset seen when the last edit notification was accepted,
    /// before the pass moved it.
    #[must_use]
    pub fn observed_selection(&self) -> usize {
        self.observed_selection
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// The re-entrancy guard.
    #[must_use]
    pub fn session(&self) -> &Rc<EditSession> {
        &self.session
    }

    /// The watched field.
    #[must_use]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Detach and return the field.
    pub fn into_field(self) -> F {
        self.field
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn current_digits(&self) -> String {
        let text = self.field.text();
        extract_digits(skip_chars(&text, self.config.prefix_len())).into_owned()
    }

    fn check_digit_count(&self, count: usize) -> Result<(), InputError> {
        let max = self.config.max_digits();
        if count > max {
            return Err(InputError::TooManyDigits { count, max });
        }
        Ok(())
    }

    fn refresh_snapshot(&mut self) {
        self.last_raw_text = self.field.text().into_owned();
        self.last_selection_start = self.field.selection_start();
    }

    fn adopt_layout(&mut self, formatted: FormattedNumber) {
        self.valid_positions = formatted.valid_positions;
        self.decorations = formatted.decorations;
    }

    fn reject_overflow(&mut self, count: usize) {
        tracing::debug!(
            count,
            max = self.config.max_digits(),
            "rejecting edit: too many digits"
        );
        // Cursor goes to the end, not back to where it was.
        let end = char_len(&self.last_raw_text);
        self.field.replace_all(&self.last_raw_text);
        self.field.set_selection(end);
    }

    fn clear_field(&mut self) {
        self.field.replace_all("");
        self.field.set_selection(0);
        self.ensure_prefix();
        self.adopt_layout(format("", &self.config));
    }

    fn apply_digits(&mut self, digits: &str, prior_selection_start: usize) {
        let formatted = format(digits, &self.config);
        let new_len = formatted.char_len();
        let cursor = shift_cursor(
            prior_selection_start,
            char_len(&self.last_raw_text),
            new_len,
        );
        tracing::trace!(text = %formatted.text, cursor, "reformatted");
        self.field.replace_all(&formatted.text);
        self.field.set_selection(cursor);
        self.adopt_layout(formatted);
    }

    fn write_digits(&mut self, digits: &str) {
        let _scope = self.session.enter();
        if digits.is_empty() {
            self.clear_field();
        } else {
            let formatted = format(digits, &self.config);
            self.field.replace_all(&formatted.text);
            self.field.set_selection(formatted.char_len());
            self.adopt_layout(formatted);
        }
        self.ensure_prefix();
        self.validate_current_number();
        self.refresh_snapshot();
    }

    fn ensure_prefix(&mut self) {
        let Some(prefix) = self.config.prefix() else {
            return;
        };
        if self.field.text().starts_with(prefix) {
            return;
        }
        tracing::debug!(prefix, "restoring missing prefix");
        self.field.replace_all(prefix);
        self.field.set_selection(self.config.prefix_len());
        self.adopt_layout(format("", &self.config));
    }

    fn validate_number(&mut self, digits: String) -> bool {
        let valid = self.validator.validate(&digits);
        self.is_valid = valid;
        if let Some(listener) = self.listener.as_mut() {
            if valid {
                listener.on_phone_number_valid(&digits);
            } else {
                listener.on_phone_number_invalid(&digits);
            }
        }
        tracing::trace!(digits = %digits, valid, "validated");
        self.phone_number = Some(digits);
        valid
    }
}

/// Shift `prior` by the change in text length, saturating to `[0, new_len]`.
fn shift_cursor(prior: usize, old_len: usize, new_len: usize) -> usize {
    let shifted = if new_len >= old_len {
        prior.saturating_add(new_len - old_len)
    } else {
        prior.saturating_sub(old_len - new_len)
    };
    shifted.min(new_len)
}

impl<F: TextField + fmt::Debug> fmt::Debug for PhoneNumberInput<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneNumberInput")
            .field("field", &self.field)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("phone_number", &self.phone_number)
            .field("is_valid", &self.is_valid)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
