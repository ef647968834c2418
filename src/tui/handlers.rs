//! Key handling shared by every text field in the TUI.
//!
//! Text fields are plain `String`s in the screen models. Keys are classified
//! here and applied with [`apply_text_key`], so editing behaves the same in
//! the search box, the detail editor and the login forms.

use iocraft::prelude::{KeyCode, KeyModifiers};

/// What a key press means to a focused text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Insert(char),
    Backspace,
    /// Ctrl+U
    ClearLine,
    /// Enter
    Commit,
    /// Esc
    Cancel,
    /// Tab
    NextField,
    /// Shift+Tab
    PrevField,
    /// Ctrl+Q or Ctrl+C
    Quit,
    Ignore,
}

/// Classify a key press for a focused text field.
pub fn classify_text_key(code: KeyCode, modifiers: KeyModifiers) -> TextKey {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => TextKey::Quit,
        KeyCode::Char('u') if ctrl => TextKey::ClearLine,
        KeyCode::Char(_) if ctrl || modifiers.contains(KeyModifiers::ALT) => TextKey::Ignore,
        KeyCode::Char(c) => TextKey::Insert(c),
        KeyCode::Backspace => TextKey::Backspace,
        KeyCode::Enter => TextKey::Commit,
        KeyCode::Esc => TextKey::Cancel,
        KeyCode::Tab => TextKey::NextField,
        KeyCode::BackTab => TextKey::PrevField,
        _ => TextKey::Ignore,
    }
}

/// Apply an editing key to `text`. Returns true if the text changed.
pub fn apply_text_key(text: &mut String, key: TextKey) -> bool {
    match key {
        TextKey::Insert(c) => {
            text.push(c);
            true
        }
        TextKey::Backspace => text.pop().is_some(),
        TextKey::ClearLine if !text.is_empty() => {
            text.clear();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_chars() {
        assert_eq!(
            classify_text_key(KeyCode::Char('q'), KeyModifiers::NONE),
            TextKey::Insert('q')
        );
        assert_eq!(
            classify_text_key(KeyCode::Char('P'), KeyModifiers::SHIFT),
            TextKey::Insert('P')
        );
    }

    #[test]
    fn test_classify_control_keys() {
        assert_eq!(
            classify_text_key(KeyCode::Char('q'), KeyModifiers::CONTROL),
            TextKey::Quit
        );
        assert_eq!(
            classify_text_key(KeyCode::Char('u'), KeyModifiers::CONTROL),
            TextKey::ClearLine
        );
        assert_eq!(
            classify_text_key(KeyCode::Char('x'), KeyModifiers::CONTROL),
            TextKey::Ignore
        );
        assert_eq!(classify_text_key(KeyCode::Esc, KeyModifiers::NONE), TextKey::Cancel);
        assert_eq!(classify_text_key(KeyCode::Enter, KeyModifiers::NONE), TextKey::Commit);
        assert_eq!(classify_text_key(KeyCode::BackTab, KeyModifiers::SHIFT), TextKey::PrevField);
    }

    #[test]
    fn test_apply_edits() {
        let mut text = String::from("ab");
        assert!(apply_text_key(&mut text, TextKey::Insert('ç')));
        assert_eq!(text, "abç");
        assert!(apply_text_key(&mut text, TextKey::Backspace));
        assert_eq!(text, "ab");
        assert!(apply_text_key(&mut text, TextKey::ClearLine));
        assert!(!apply_text_key(&mut text, TextKey::Backspace));
        assert!(!apply_text_key(&mut text, TextKey::Commit));
    }
}
