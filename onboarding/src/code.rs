//! Six-box verification code entry.

use std::fmt;

pub const CODE_LENGTH: usize = 6;

/// Entered locally, this code completes verification without a server call.
pub const BYPASS_CODE: &str = "123456";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEdit {
    /// Input refused; no box changed.
    Rejected,
    /// Box updated. `focus` is the box that should take focus next, if any.
    Applied { focus: Option<usize> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationCode {
    slots: [Option<char>; CODE_LENGTH],
}

impl VerificationCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Replace one box with `value`. Empty input clears the box; anything
    /// other than a single ASCII digit is refused.
    pub fn enter(&mut self, index: usize, value: &str) -> CodeEdit {
        if index >= CODE_LENGTH {
            return CodeEdit::Rejected;
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                self.slots[index] = None;
                CodeEdit::Applied { focus: None }
            }
            (Some(c), None) if c.is_ascii_digit() => {
                self.slots[index] = Some(c);
                let focus = (index + 1 < CODE_LENGTH).then_some(index + 1);
                CodeEdit::Applied { focus }
            }
            _ => CodeEdit::Rejected,
        }
    }

    /// Backspace on an empty box moves focus back one box. Values are never
    /// touched here; deleting a filled box goes through `enter(index, "")`.
    pub fn backspace(&self, index: usize) -> Option<usize> {
        if index > 0 && index < CODE_LENGTH && self.slots[index].is_none() {
            Some(index - 1)
        } else {
            None
        }
    }

    /// Spread a pasted string over all boxes. Only the first six characters
    /// are considered and they must all be digits, otherwise nothing changes.
    /// Returns the box to focus: the last one filled.
    pub fn paste(&mut self, text: &str) -> Option<usize> {
        let pasted: Vec<char> = text.chars().take(CODE_LENGTH).collect();
        if pasted.is_empty() || !pasted.iter().all(char::is_ascii_digit) {
            tracing::debug!("ignoring non-numeric paste into code boxes");
            return None;
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = pasted.get(i).copied();
        }
        Some(pasted.len() - 1)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.slots.iter().flatten() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_entry_advances_focus() {
        let mut code = VerificationCode::new();
        assert_eq!(code.enter(0, "7"), CodeEdit::Applied { focus: Some(1) });
        assert_eq!(code.slot(0), Some('7'));
        assert_eq!(code.enter(5, "3"), CodeEdit::Applied { focus: None });
    }

    #[test]
    fn non_digit_leaves_box_unchanged() {
        let mut code = VerificationCode::new();
        code.enter(2, "4");
        for bad in ["a", " ", "-", "44", "٣"] {
            assert_eq!(code.enter(2, bad), CodeEdit::Rejected);
            assert_eq!(code.slot(2), Some('4'));
        }
    }

    #[test]
    fn empty_entry_clears_box() {
        let mut code = VerificationCode::new();
        code.enter(1, "9");
        assert_eq!(code.enter(1, ""), CodeEdit::Applied { focus: None });
        assert_eq!(code.slot(1), None);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut code = VerificationCode::new();
        assert_eq!(code.enter(CODE_LENGTH, "1"), CodeEdit::Rejected);
    }

    #[test]
    fn backspace_on_empty_box_retreats_without_edit() {
        let mut code = VerificationCode::new();
        code.enter(0, "1");
        code.enter(1, "2");
        let before = code.clone();

        assert_eq!(code.backspace(2), Some(1));
        assert_eq!(code, before);
        // Filled box: native deletion handles it, no focus move.
        assert_eq!(code.backspace(1), None);
        // First box never retreats.
        assert_eq!(VerificationCode::new().backspace(0), None);
    }

    #[test]
    fn mixed_paste_is_rejected_entirely() {
        let mut code = VerificationCode::new();
        code.enter(0, "9");
        assert_eq!(code.paste("12ab56"), None);
        assert_eq!(code.slot(0), Some('9'));
        assert_eq!(code.filled(), 1);
    }

    #[test]
    fn short_paste_fills_prefix_and_focuses_last_filled() {
        let mut code = VerificationCode::new();
        code.enter(5, "8");
        assert_eq!(code.paste("4321"), Some(3));
        assert_eq!(code.to_string(), "4321");
        assert_eq!(code.slot(4), None);
        assert_eq!(code.slot(5), None);
    }

    #[test]
    fn long_paste_is_truncated() {
        let mut code = VerificationCode::new();
        assert_eq!(code.paste("98765432"), Some(5));
        assert!(code.is_complete());
        assert_eq!(code.to_string(), "987654");
    }

    #[test]
    fn empty_paste_is_ignored() {
        let mut code = VerificationCode::new();
        assert_eq!(code.paste(""), None);
    }

    #[test]
    fn only_first_six_characters_are_checked() {
        let mut code = VerificationCode::new();
        assert_eq!(code.paste("123456abc"), Some(5));
        assert_eq!(code.to_string(), "123456");
    }
}
