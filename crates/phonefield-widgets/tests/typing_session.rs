use std::cell::RefCell;
use std::rc::Rc;

use phonefield_text::{FormatConfig, InsertionTable};
use phonefield_widgets::{
    EdgeTriggered, EditSession, FnListener, InputError, MemoryField, PhoneNumberInput,
    PhoneNumberListener,
};

#[derive(Debug, Default)]
struct Log(Vec<String>);

impl PhoneNumberListener for Log {
    fn on_phone_number_valid(&mut self, phone_number: &str) {
        self.0.push(format!("valid {phone_number}"));
    }

    fn on_phone_number_invalid(&mut self, digits: &str) {
        self.0.push(format!("invalid {digits}"));
    }
}

fn guarded_input(config: FormatConfig) -> (PhoneNumberInput<MemoryField>, Rc<EditSession>) {
    let session = EditSession::new();
    let field = MemoryField::new().with_session(Rc::clone(&session));
    let input = PhoneNumberInput::with_session(field, config, Rc::clone(&session));
    (input, session)
}

fn type_str(input: &mut PhoneNumberInput<MemoryField>, s: &str) {
    for c in s.chars() {
        input.apply_user_edit(|f| f.type_str(c.encode_utf8(&mut [0; 4])));
    }
}

#[test]
fn default_config_types_a_full_number() {
    let (mut input, _) = guarded_input(FormatConfig::default());
    type_str(&mut input, "9161234567");
    assert_eq!(input.formatted_phone_number(), "+7 (916) 123 45 67");
    assert!(input.is_valid_number());
}

#[test]
fn separators_typed_by_the_user_are_normalized() {
    let config = FormatConfig::ru().with_insertions(InsertionTable::braces_and_dashes());
    let (mut input, _) = guarded_input(config);
    type_str(&mut input, "916-123 45.67");
    assert_eq!(input.formatted_phone_number(), "+7 (916) 123-45-67");
    assert_eq!(input.phone_number(), Some("9161234567"));
}

#[test]
fn pasting_over_the_whole_field() {
    let config = FormatConfig::ru().with_insertions(InsertionTable::spaced());
    let (mut input, _) = guarded_input(config);
    input.apply_user_edit(|f| f.set_text("+7 (916) 123-45-67"));
    assert_eq!(input.formatted_phone_number(), "+7 916 123 45 67");
    assert!(input.is_valid_number());
}

#[test]
fn pasting_too_much_is_rejected_as_a_whole() {
    let (mut input, _) = guarded_input(FormatConfig::ru());
    type_str(&mut input, "916");
    input.apply_user_edit(|f| f.type_str("12345678"));
    assert_eq!(input.formatted_phone_number(), "+7 (916");
    assert_eq!(input.field().cursor(), 7);
    assert_eq!(input.phone_number(), Some("916"));
}

#[test]
fn backspacing_to_empty_and_typing_again() {
    let (mut input, session) = guarded_input(FormatConfig::ru());
    type_str(&mut input, "9161");
    for _ in 0..10 {
        input.apply_user_edit(MemoryField::backspace);
    }
    assert_eq!(input.formatted_phone_number(), "+7 ");
    assert_eq!(input.field().cursor(), 3);

    type_str(&mut input, "8");
    assert_eq!(input.formatted_phone_number(), "+7 (8");
    assert_eq!(input.field().unguarded_writes(), 0);
    assert!(session.suppressed_notifications() > 0);
}

#[test]
fn edge_triggered_listener_sees_transitions_only() {
    let (mut input, _) = guarded_input(FormatConfig::ru());
    let log = Rc::new(RefCell::new(Log::default()));
    input.set_listener(EdgeTriggered::new(Rc::clone(&log)));

    type_str(&mut input, "9161234567");
    input.apply_user_edit(MemoryField::backspace);

    assert_eq!(
        log.borrow().0,
        ["invalid ", "valid 9161234567", "invalid 916123456"]
    );
}

#[test]
fn closure_listener() {
    let (mut input, _) = guarded_input(FormatConfig::ru());
    let valid = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&valid);
    input.set_listener(FnListener::new(
        move |n: &str| *sink.borrow_mut() = Some(n.to_owned()),
        |_: &str| {},
    ));
    input.set_phone_number("(916) 123-45-67").unwrap();
    assert_eq!(valid.borrow().as_deref(), Some("9161234567"));
}

#[test]
fn without_prefix_the_field_may_become_empty() {
    let config = FormatConfig::builder()
        .no_prefix()
        .insertions(InsertionTable::spaced())
        .build()
        .unwrap();
    let (mut input, _) = guarded_input(config);
    assert_eq!(input.formatted_phone_number(), "");

    type_str(&mut input, "9161");
    assert_eq!(input.formatted_phone_number(), "916 1");
    input.clear();
    assert_eq!(input.formatted_phone_number(), "");
    assert_eq!(input.field().cursor(), 0);
}

#[test]
fn switching_prefix_mid_session() {
    let (mut input, _) = guarded_input(FormatConfig::ru());
    input.set_phone_number("9161234567").unwrap();
    input.set_prefix(None);
    // The old prefix now reads as part of the number.
    assert_eq!(input.formatted_phone_number(), "+7 (916) 123 45 67");
    let err = input.reformat().unwrap_err();
    assert_eq!(err, InputError::TooManyDigits { count: 11, max: 10 });
    assert_eq!(input.formatted_phone_number(), "+7 (916) 123 45 67");
    assert_eq!(input.field().cursor(), 18);

    // Raising the cap lets the wider number through.
    input.set_max_digits(11).unwrap();
    input.reformat().unwrap();
    assert_eq!(input.formatted_phone_number(), "(791) 612 34 567");
    assert!(!input.is_valid_number());
}

