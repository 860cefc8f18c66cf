#![forbid(unsafe_code)]

//! The editing half of phonefield.
//!
//! [`PhoneNumberInput`] attaches to anything implementing [`TextField`] and
//! keeps it in canonical phone-number form while the user types. Writes it
//! makes itself are fenced off by an [`EditSession`] so the widget's echo
//! notifications are not mistaken for user edits.
//!
//! [`MemoryField`] is a headless field for tests and scripted input.

pub mod error;
pub mod field;
pub mod input;
pub mod listener;
pub mod session;

pub use error::InputError;
pub use field::{MemoryField, TextField};
pub use input::PhoneNumberInput;
pub use listener::{EdgeTriggered, FnListener, PhoneNumberListener};
pub use session::{ApplyScope, EditSession, SessionState};
