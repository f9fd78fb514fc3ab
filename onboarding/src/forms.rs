use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::validation::{is_blank, passwords_match, PasswordPolicy};

/// Which sub-form the register view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    SignUp,
    SignIn,
}

const REDACTED: &str = "[redacted]";

#[derive(Clone, Default)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl RegistrationDraft {
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::evaluate(&self.password)
    }

    pub fn passwords_match(&self) -> bool {
        passwords_match(&self.password, &self.confirm_password)
    }

    /// The mismatch hint is only shown once something was typed in the
    /// confirmation field.
    pub fn shows_mismatch(&self) -> bool {
        !self.confirm_password.is_empty() && !self.passwords_match()
    }

    // No email format check here; only non-blank.
    pub fn is_valid(&self) -> bool {
        !is_blank(&self.first_name)
            && !is_blank(&self.last_name)
            && !is_blank(&self.email)
            && self.password_policy().is_satisfied()
            && self.passwords_match()
            && self.agree_to_terms
    }

    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
        *self = Self::default();
    }
}

#[derive(Clone, Default)]
pub struct SignInDraft {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl SignInDraft {
    pub fn is_valid(&self) -> bool {
        !is_blank(&self.email) && !is_blank(&self.password)
    }

    pub fn to_request(&self) -> SignInRequest {
        SignInRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

// Passwords never reach debug output or logs.

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .field("agree_to_terms", &self.agree_to_terms)
            .finish()
    }
}

impl fmt::Debug for SignInDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInDraft")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("remember_me", &self.remember_me)
            .finish()
    }
}
