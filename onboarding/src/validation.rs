//! Password and form rules shared by the sign-up and sign-in forms.

use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the "one symbol" rule.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

lazy_static! {
    static ref UPPERCASE: Regex = Regex::new("[A-Z]").unwrap();
    static ref DIGIT: Regex = Regex::new("[0-9]").unwrap();
    static ref SYMBOL: Regex = Regex::new(&format!("[{}]", regex::escape(PASSWORD_SYMBOLS))).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordPolicy {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_number: bool,
    pub has_symbol: bool,
}

impl PasswordPolicy {
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: UPPERCASE.is_match(password),
            has_number: DIGIT.is_match(password),
            has_symbol: SYMBOL.is_match(password),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.has_min_length && self.has_uppercase && self.has_number && self.has_symbol
    }

    /// Each rule with the label shown next to its check mark.
    pub fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("At least 8 characters", self.has_min_length),
            ("Includes one uppercase", self.has_uppercase),
            ("Includes one number", self.has_number),
            ("Includes one symbol", self.has_symbol),
        ]
    }
}

pub fn passwords_match(password: &str, confirm: &str) -> bool {
    !confirm.is_empty() && password == confirm
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
