#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use phonefield_text::{FormatConfig, InsertionTable};
use phonefield_widgets::{EditSession, MemoryField, PhoneNumberInput, TextField};

#[derive(Debug, Arbitrary)]
enum Edit {
    Type(String),
    Backspace,
    DeleteForward,
    MoveCursor(u8),
    Paste { start: u8, end: u8, text: String },
    SelectAllPaste(String),
    Clear,
    SetNumber(String),
    Select(u8),
    Reformat,
}

#[derive(Debug, Arbitrary)]
struct Script {
    preset: u8,
    max_digits: u8,
    edits: Vec<Edit>,
}

fuzz_target!(|script: Script| {
    let table = match script.preset % 4 {
        0 => InsertionTable::empty(),
        1 => InsertionTable::spaced(),
        2 => InsertionTable::braces(),
        _ => InsertionTable::braces_and_dashes(),
    };
    let max = usize::from(script.max_digits % 16).max(1);
    let Ok(config) = FormatConfig::ru()
        .with_insertions(table)
        .with_max_digits(max)
    else {
        return;
    };

    let session = EditSession::new();
    let field = MemoryField::new().with_session(Rc::clone(&session));
    let mut input = PhoneNumberInput::with_session(field, config, Rc::clone(&session));

    for edit in script.edits {
        match edit {
            Edit::Type(s) => input.apply_user_edit(|f| f.type_str(&s)),
            Edit::Backspace => input.apply_user_edit(MemoryField::backspace),
            Edit::DeleteForward => input.apply_user_edit(MemoryField::delete_forward),
            Edit::MoveCursor(n) => input.apply_user_edit(|f| f.set_cursor(usize::from(n))),
            Edit::Paste { start, end, text } => input.apply_user_edit(|f| {
                f.replace_range(usize::from(start), usize::from(end), &text);
            }),
            Edit::SelectAllPaste(s) => input.apply_user_edit(|f| f.set_text(&s)),
            Edit::Clear => input.clear(),
            Edit::SetNumber(n) => {
                let _ = input.set_phone_number(&n);
            }
            Edit::Select(n) => {
                input.on_selection_changed(usize::from(n));
            }
            Edit::Reformat => {
                let _ = input.reformat();
            }
        }

        let text = input.formatted_phone_number();
        assert!(text.starts_with("+7 "));
        assert!(input.field().selection_start() <= input.field().len());
        assert!(!session.is_applying());
        assert_eq!(input.field().unguarded_writes(), 0);
    }
});
