// Single-line text input for the login and signup forms
//
// Append-only editing is enough here: characters, backspace, clear. The
// renderer masks password fields itself.

use crossterm::event::KeyCode;

/// A single-line editable text field
#[derive(Debug, Default)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Feed one key into the field. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(ch) => {
                self.value.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// Masked rendering for password fields
    pub fn masked(&self) -> String {
        "•".repeat(self.value.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_appends_and_backspace_removes() {
        let mut input = TextInput::default();
        for ch in "martin".chars() {
            assert!(input.handle_key(KeyCode::Char(ch)));
        }
        assert_eq!(input.value(), "martin");

        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.value(), "marti");
    }

    #[test]
    fn test_backspace_respects_multibyte_characters() {
        let mut input = TextInput::default();
        input.handle_key(KeyCode::Char('é'));
        input.handle_key(KeyCode::Backspace);
        assert!(input.is_empty());
    }

    #[test]
    fn test_masked_counts_characters() {
        let mut input = TextInput::default();
        input.handle_key(KeyCode::Char('é'));
        input.handle_key(KeyCode::Char('t'));
        assert_eq!(input.masked(), "••");
    }

    #[test]
    fn test_navigation_keys_are_not_consumed() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(KeyCode::Tab));
        assert!(!input.handle_key(KeyCode::Enter));
        assert!(input.is_empty());
    }
}
