//! Validity listeners.
//!
//! [`PhoneNumberInput`](crate::PhoneNumberInput) invokes its listener on
//! **every** validation pass, not only when validity flips. Code that only
//! cares about transitions wraps its listener in [`EdgeTriggered`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receives the outcome of each validation pass.
pub trait PhoneNumberListener {
    /// The field holds a valid number.
    fn on_phone_number_valid(&mut self, phone_number: &str);

    /// The field holds an incomplete or otherwise invalid number.
    fn on_phone_number_invalid(&mut self, digits: &str);
}

/// Shared listeners let the owner keep a handle for inspection.
impl<L: PhoneNumberListener + ?Sized> PhoneNumberListener for Rc<RefCell<L>> {
    fn on_phone_number_valid(&mut self, phone_number: &str) {
        self.borrow_mut().on_phone_number_valid(phone_number);
    }

    fn on_phone_number_invalid(&mut self, digits: &str) {
        self.borrow_mut().on_phone_number_invalid(digits);
    }
}

impl<L: PhoneNumberListener + ?Sized> PhoneNumberListener for Box<L> {
    fn on_phone_number_valid(&mut self, phone_number: &str) {
        (**self).on_phone_number_valid(phone_number);
    }

    fn on_phone_number_invalid(&mut self, digits: &str) {
        (**self).on_phone_number_invalid(digits);
    }
}

/// A listener built from two closures.
///
/// ```
/// use phonefield_widgets::{FnListener, PhoneNumberListener};
///
/// let mut listener = FnListener::new(
///     |n: &str| println!("valid: {n}"),
///     |d: &str| println!("incomplete: {d}"),
/// );
/// listener.on_phone_number_invalid("916");
/// ```
pub struct FnListener<V, I> {
    on_valid: V,
    on_invalid: I,
}

impl<V, I> FnListener<V, I>
where
    V: FnMut(&str),
    I: FnMut(&str),
{
    /// Create a listener from `on_valid` and `on_invalid` callbacks.
    pub fn new(on_valid: V, on_invalid: I) -> Self {
        Self {
            on_valid,
            on_invalid,
        }
    }
}

impl<V, I> PhoneNumberListener for FnListener<V, I>
where
    V: FnMut(&str),
    I: FnMut(&str),
{
    fn on_phone_number_valid(&mut self, phone_number: &str) {
        (self.on_valid)(phone_number);
    }

    fn on_phone_number_invalid(&mut self, digits: &str) {
        (self.on_invalid)(digits);
    }
}

impl<V, I> fmt::Debug for FnListener<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

/// Forwards only validity transitions to the wrapped listener.
///
/// The first pass is always forwarded. After that, a callback reaches the
/// inner listener only when validity differs from the previous pass.
#[derive(Debug, Clone)]
pub struct EdgeTriggered<L> {
    inner: L,
    last: Option<bool>,
}

impl<L> EdgeTriggered<L> {
    /// Wrap `inner`.
    pub fn new(inner: L) -> Self {
        Self { inner, last: None }
    }

    /// Validity seen on the last pass, if any.
    #[must_use]
    pub fn last_validity(&self) -> Option<bool> {
        self.last
    }

    /// The wrapped listener.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> L {
        self.inner
    }

    fn transition(&mut self, valid: bool) -> bool {
        let changed = self.last != Some(valid);
        self.last = Some(valid);
        changed
    }
}

impl<L: PhoneNumberListener> PhoneNumberListener for EdgeTriggered<L> {
    fn on_phone_number_valid(&mut self, phone_number: &str) {
        if self.transition(true) {
            self.inner.on_phone_number_valid(phone_number);
        }
    }

    fn on_phone_number_invalid(&mut self, digits: &str) {
        if self.transition(false) {
            self.inner.on_phone_number_invalid(digits);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PhoneNumberListener;

    /// One recorded listener callback.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Event {
        Valid(String),
        Invalid(String),
    }

    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) events: Vec<Event>,
    }

    impl PhoneNumberListener for Recorder {
        fn on_phone_number_valid(&mut self, phone_number: &str) {
            self.events.push(Event::Valid(phone_number.to_owned()));
        }

        fn on_phone_number_invalid(&mut self, digits: &str) {
            self.events.push(Event::Invalid(digits.to_owned()));
        }
    }
}
