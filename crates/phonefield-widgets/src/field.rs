//! The text-field boundary consumed by [`PhoneNumberInput`](crate::PhoneNumberInput).
//!
//! A concrete toolkit binding implements [`TextField`] over its own widget.
//! [`MemoryField`] is a headless implementation used in tests and for
//! driving the controller without a UI.
//!
//! All offsets are char offsets.

use std::borrow::Cow;
use std::rc::Rc;

use phonefield_text::digits::char_len;

use crate::session::EditSession;

/// Operations the controller needs from a single-line text input.
pub trait TextField {
    /// Current content.
    fn text(&self) -> Cow<'_, str>;

    /// Cursor offset (start of the selection).
    fn selection_start(&self) -> usize;

    /// Replace the whole content. Widgets are allowed to re-notify their
    /// watchers from here.
    fn replace_all(&mut self, text: &str);

    /// Move the cursor. Implementations clamp to `[0, len]`.
    fn set_selection(&mut self, offset: usize);

    /// Content length in chars.
    fn len(&self) -> usize {
        char_len(&self.text())
    }

    /// Whether the field is empty.
    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl<F: TextField + ?Sized> TextField for &mut F {
    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }

    fn selection_start(&self) -> usize {
        (**self).selection_start()
    }

    fn replace_all(&mut self, text: &str) {
        (**self).replace_all(text);
    }

    fn set_selection(&mut self, offset: usize) {
        (**self).set_selection(offset);
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<F: TextField + ?Sized> TextField for Box<F> {
    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }

    fn selection_start(&self) -> usize {
        (**self).selection_start()
    }

    fn replace_all(&mut self, text: &str) {
        (**self).replace_all(text);
    }

    fn set_selection(&mut self, offset: usize) {
        (**self).set_selection(offset);
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Headless single-line text field.
///
/// Programmatic writes through [`TextField::replace_all`] behave like a real
/// widget's: the cursor lands at the end of the new text, and if an
/// [`EditSession`] is attached the write re-notifies it. A re-notification
/// the session accepts (i.e. one that arrived while idle) is counted as an
/// unguarded write, which a correct controller never produces.
///
/// The user-side methods ([`type_str`](Self::type_str),
/// [`backspace`](Self::backspace), ...) edit without notifying; the caller
/// delivers the notification, usually via
/// [`PhoneNumberInput::apply_user_edit`](crate::PhoneNumberInput::apply_user_edit).
#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    text: String,
    cursor: usize,
    session: Option<Rc<EditSession>>,
    programmatic_writes: u64,
    unguarded_writes: u64,
}

impl MemoryField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding `text` with the cursor at its end.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = char_len(&text);
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    /// Re-notify `session` on every programmatic write.
    #[must_use]
    pub fn with_session(mut self, session: Rc<EditSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Cursor offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Writes made through [`TextField::replace_all`].
    #[must_use]
    pub fn programmatic_writes(&self) -> u64 {
        self.programmatic_writes
    }

    /// Programmatic writes whose re-notification the session accepted.
    #[must_use]
    pub fn unguarded_writes(&self) -> u64 {
        self.unguarded_writes
    }

    // ---- user-side editing ----

    /// Place the cursor, clamped to the content.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.char_count());
    }

    /// Insert `s` at the cursor and move the cursor past it.
    pub fn type_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += char_len(s);
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Delete the char after the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Replace the char range `start..end` with `s`, leaving the cursor after
    /// the inserted text (a paste over a selection).
    pub fn replace_range(&mut self, start: usize, end: usize, s: &str) {
        let len = self.char_count();
        let end = end.min(len);
        let start = start.min(end);
        let (bs, be) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(bs..be, s);
        self.cursor = start + char_len(s);
    }

    /// Replace everything, as a user select-all + paste would.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = char_len(text);
    }

    fn char_count(&self) -> usize {
        char_len(&self.text)
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

impl TextField for MemoryField {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn selection_start(&self) -> usize {
        self.cursor
    }

    fn replace_all(&mut self, text: &str) {
        self.set_text(text);
        self.programmatic_writes += 1;
        if let Some(session) = &self.session {
            if session.accept_notification() {
                self.unguarded_writes += 1;
            }
        }
    }

    fn set_selection(&mut self, offset: usize) {
        self.set_cursor(offset);
    }

    fn len(&self) -> usize {
        self.char_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_text_puts_cursor_at_end() {
        let field = MemoryField::with_text("+7 ");
        assert_eq!(field.cursor(), 3);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn typing_and_deleting() {
        let mut field = MemoryField::with_text("+7 (916");
        field.set_cursor(4);
        field.type_str("8");
        assert_eq!(field.as_str(), "+7 (8916");
        assert_eq!(field.cursor(), 5);

        field.backspace();
        assert_eq!(field.as_str(), "+7 (916");
        assert_eq!(field.cursor(), 4);

        field.delete_forward();
        assert_eq!(field.as_str(), "+7 (16");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn edits_at_bounds_are_noops() {
        let mut field = MemoryField::with_text("ab");
        field.delete_forward();
        assert_eq!(field.as_str(), "ab");
        field.set_cursor(0);
        field.backspace();
        assert_eq!(field.as_str(), "ab");
    }

    #[test]
    fn cursor_clamps() {
        let mut field = MemoryField::with_text("abc");
        field.set_selection(99);
        assert_eq!(field.selection_start(), 3);
    }

    #[test]
    fn multibyte_offsets() {
        let mut field = MemoryField::with_text("\u{00a0}\u{2013}");
        field.set_cursor(1);
        field.type_str("5");
        assert_eq!(field.as_str(), "\u{00a0}5\u{2013}");
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn replace_range_pastes_over_selection() {
        let mut field = MemoryField::with_text("+7 (916) 123");
        field.replace_range(4, 7, "800");
        assert_eq!(field.as_str(), "+7 (800) 123");
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn programmatic_write_renotifies_session() {
        let session = EditSession::new();
        let mut field = MemoryField::new().with_session(Rc::clone(&session));

        field.replace_all("idle write");
        assert_eq!(field.unguarded_writes(), 1);

        {
            let _scope = session.enter();
            field.replace_all("guarded write");
        }
        assert_eq!(field.programmatic_writes(), 2);
        assert_eq!(field.unguarded_writes(), 1);
        assert_eq!(session.suppressed_notifications(), 1);
        assert_eq!(field.cursor(), "guarded write".len());
    }

    #[test]
    fn forwarding_impls() {
        let mut field = MemoryField::new();
        {
            let mut by_ref: &mut MemoryField = &mut field;
            TextField::replace_all(&mut by_ref, "abc");
            by_ref.set_selection(1);
        }
        let boxed: Box<dyn TextField> = Box::new(field);
        assert_eq!(boxed.text(), "abc");
        assert_eq!(boxed.selection_start(), 1);
        assert_eq!(boxed.len(), 3);
    }
}
