//! Property-based tests for the password policy and code entry rules.

use proptest::prelude::*;

use onboarding::validation::{passwords_match, MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS};
use onboarding::{CodeEdit, PasswordPolicy, VerificationCode, CODE_LENGTH};

proptest! {
    #[test]
    fn length_rule_counts_characters(password in any::<String>()) {
        let policy = PasswordPolicy::evaluate(&password);
        prop_assert_eq!(policy.has_min_length, password.chars().count() >= MIN_PASSWORD_LENGTH);
    }

    #[test]
    fn uppercase_rule_is_ascii_a_to_z(password in any::<String>()) {
        let policy = PasswordPolicy::evaluate(&password);
        prop_assert_eq!(policy.has_uppercase, password.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn number_rule_is_ascii_digits(password in any::<String>()) {
        let policy = PasswordPolicy::evaluate(&password);
        prop_assert_eq!(policy.has_number, password.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn symbol_rule_matches_the_listed_set(password in any::<String>()) {
        let policy = PasswordPolicy::evaluate(&password);
        prop_assert_eq!(policy.has_symbol, password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)));
    }

    #[test]
    fn satisfied_iff_every_rule_holds(password in "[a-zA-Z0-9!@#$%^&*(),.?\":{}|<> _-]{0,16}") {
        let policy = PasswordPolicy::evaluate(&password);
        let all = policy.checks().iter().all(|(_, ok)| *ok);
        prop_assert_eq!(policy.is_satisfied(), all);
    }

    #[test]
    fn match_requires_equal_non_empty(password in any::<String>(), confirm in any::<String>()) {
        prop_assert_eq!(passwords_match(&password, &confirm), password == confirm && !confirm.is_empty());
        prop_assert_eq!(passwords_match(&password, &password), !password.is_empty());
    }

    #[test]
    fn single_box_accepts_only_empty_or_one_digit(index in 0..CODE_LENGTH, value in any::<String>()) {
        let mut code = VerificationCode::default();
        let edit = code.enter(index, &value);

        let mut chars = value.chars();
        let acceptable = match (chars.next(), chars.next()) {
            (None, _) => true,
            (Some(c), None) => c.is_ascii_digit(),
            _ => false,
        };
        prop_assert_eq!(edit != CodeEdit::Rejected, acceptable);
        prop_assert_eq!(code.slot(index), value.chars().next().filter(|_| acceptable));
    }

    #[test]
    fn numeric_paste_fills_from_the_first_box(digits in "[0-9]{1,10}") {
        let mut code = VerificationCode::default();
        let filled = digits.len().min(CODE_LENGTH);

        prop_assert_eq!(code.paste(&digits), Some(filled - 1));
        prop_assert_eq!(code.filled(), filled);
        prop_assert_eq!(code.is_complete(), filled == CODE_LENGTH);
    }

    #[test]
    fn paste_with_a_non_digit_changes_nothing(prefix in "[0-9]{0,5}", bad in "[^0-9]") {
        let mut code = VerificationCode::default();
        code.enter(0, "7");

        prop_assert_eq!(code.paste(&format!("{}{}", prefix, bad)), None);
        prop_assert_eq!(code.slot(0), Some('7'));
        prop_assert_eq!(code.filled(), 1);
    }
}
