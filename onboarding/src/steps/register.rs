use crate::client::{AuthBackend, RegistrationReceipt};
use crate::error::{OnboardingError, Result};
use crate::forms::{AuthTab, RegistrationDraft, RegistrationRequest, SignInDraft, SignInRequest};

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const SIGN_IN_FAILED: &str = "An error occurred. Please try again.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The backend accepted the account. Carries the submitted email so the
    /// flow can move on; the draft itself has been cleared.
    Registered {
        email: String,
        receipt: RegistrationReceipt,
    },
    Failed,
    /// No sign-up was in flight; the result was dropped.
    Ignored,
}

/// Call currently in flight. A sign-up remembers the email it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    SignUp { email: String },
    SignIn,
}

/// Sign-up / sign-in view model.
#[derive(Debug, Default)]
pub struct RegisterStep {
    pub draft: RegistrationDraft,
    pub sign_in: SignInDraft,
    pub show_password: bool,
    pub show_confirm_password: bool,
    pub show_sign_in_password: bool,
    tab: AuthTab,
    password_touched: bool,
    pending: Option<Pending>,
    sign_in_error: Option<String>,
    alert: Option<String>,
}

impl RegisterStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn sign_in_error(&self) -> Option<&str> {
        self.sign_in_error.as_deref()
    }

    /// Registration failure waiting to be acknowledged.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Password field lost focus.
    pub fn touch_password(&mut self) {
        self.password_touched = true;
    }

    pub fn shows_password_checks(&self) -> bool {
        self.password_touched && !self.draft.password.is_empty()
    }

    pub fn on_sign_in_changed(&mut self) {
        self.sign_in_error = None;
    }

    pub fn can_submit_sign_up(&self) -> bool {
        self.draft.is_valid() && !self.is_submitting()
    }

    pub fn can_submit_sign_in(&self) -> bool {
        self.sign_in.is_valid() && !self.is_submitting()
    }

    pub fn begin_sign_up(&mut self) -> Option<RegistrationRequest> {
        if !self.can_submit_sign_up() {
            return None;
        }
        let request = self.draft.to_request();
        self.pending = Some(Pending::SignUp {
            email: request.email.clone(),
        });
        self.alert = None;
        Some(request)
    }

    /// Apply the result of the sign-up started by `begin_sign_up`. Results
    /// with no matching sign-up in flight are dropped.
    pub fn finish_sign_up(&mut self, result: Result<RegistrationReceipt>) -> SignUpOutcome {
        let email = match self.pending.take() {
            Some(Pending::SignUp { email }) => email,
            other => {
                self.pending = other;
                tracing::warn!("dropping registration result with no sign-up in flight");
                return SignUpOutcome::Ignored;
            }
        };
        match result {
            Ok(receipt) => {
                self.draft.clear();
                tracing::info!(%email, "registration accepted");
                SignUpOutcome::Registered { email, receipt }
            }
            Err(err) => {
                self.alert = Some(failure_message(&err, REGISTRATION_FAILED));
                SignUpOutcome::Failed
            }
        }
    }

    pub async fn submit_sign_up<B>(&mut self, backend: &B) -> Option<SignUpOutcome>
    where
        B: AuthBackend + ?Sized,
    {
        let request = self.begin_sign_up()?;
        let result = backend.register(&request).await;
        Some(self.finish_sign_up(result))
    }

    pub fn begin_sign_in(&mut self) -> Option<SignInRequest> {
        if !self.can_submit_sign_in() {
            return None;
        }
        self.pending = Some(Pending::SignIn);
        self.sign_in_error = None;
        Some(self.sign_in.to_request())
    }

    pub fn finish_sign_in(&mut self, result: Result<()>) -> bool {
        if self.pending != Some(Pending::SignIn) {
            tracing::warn!("dropping sign-in result with no sign-in in flight");
            return false;
        }
        self.pending = None;
        match result {
            Ok(()) => {
                tracing::info!(email = %self.sign_in.email, "sign-in completed");
                true
            }
            Err(err) => {
                tracing::error!("sign-in error: {}", err);
                self.sign_in_error = Some(SIGN_IN_FAILED.to_string());
                false
            }
        }
    }

    pub async fn submit_sign_in<B>(&mut self, backend: &B) -> Option<bool>
    where
        B: AuthBackend + ?Sized,
    {
        let request = self.begin_sign_in()?;
        let result = backend.sign_in(&request).await;
        Some(self.finish_sign_in(result))
    }
}

/// Server message for remote failures, `fallback` when the server gave none,
/// a generic message for anything unexpected.
pub(crate) fn failure_message(err: &OnboardingError, fallback: &str) -> String {
    if err.is_network() {
        tracing::error!("remote call failed: {}", err);
        err.server_message().unwrap_or(fallback).to_string()
    } else {
        tracing::error!("unexpected error: {}", err);
        UNEXPECTED_ERROR.to_string()
    }
}
