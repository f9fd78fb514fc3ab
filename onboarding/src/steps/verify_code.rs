use crate::client::{AuthBackend, VerifyCodeRequest, VerifyCodeResponse};
use crate::code::{CodeEdit, VerificationCode, BYPASS_CODE, CODE_LENGTH};
use crate::error::Result;
use crate::state::{OnboardingSession, OnboardingStep};
use crate::steps::register::failure_message;

pub const INCOMPLETE_CODE: &str = "Please enter all 6 digits";
pub const INVALID_CODE: &str = "Invalid verification code";
pub const VERIFICATION_FAILED: &str = "Verification failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStart {
    /// Fewer than six digits; error set.
    Incomplete,
    /// A verification is already running.
    Busy,
    /// Bypass code matched; the session is already on success.
    Bypassed,
    /// Send this to the verification collaborator.
    Remote(VerifyCodeRequest),
}

/// Six-box code entry view model.
#[derive(Debug, Default)]
pub struct VerifyCodeStep {
    code: VerificationCode,
    focus: usize,
    is_verifying: bool,
    error: Option<String>,
}

impl VerifyCodeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &VerificationCode {
        &self.code
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < CODE_LENGTH {
            self.focus = index;
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.is_verifying
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.code.is_complete() && !self.is_verifying
    }

    pub fn input(&mut self, index: usize, value: &str) -> CodeEdit {
        if self.is_verifying {
            return CodeEdit::Rejected;
        }
        let edit = self.code.enter(index, value);
        if let CodeEdit::Applied { focus } = edit {
            self.error = None;
            if let Some(next) = focus {
                self.focus = next;
            }
        }
        edit
    }

    pub fn backspace(&mut self, index: usize) {
        if let Some(previous) = self.code.backspace(index) {
            self.focus = previous;
        }
    }

    /// Pastes are only taken in the first box.
    pub fn paste(&mut self, index: usize, text: &str) -> bool {
        if index != 0 || self.is_verifying {
            return false;
        }
        match self.code.paste(text) {
            Some(focus) => {
                self.focus = focus;
                true
            }
            None => false,
        }
    }

    pub fn begin_verify(&mut self, session: &mut OnboardingSession) -> VerifyStart {
        if !self.code.is_complete() {
            self.error = Some(INCOMPLETE_CODE.to_string());
            return VerifyStart::Incomplete;
        }
        if self.is_verifying {
            return VerifyStart::Busy;
        }
        self.error = None;

        let code = self.code.to_string();
        if code == BYPASS_CODE {
            tracing::info!("bypass code entered, skipping remote verification");
            session.set_step(OnboardingStep::Success);
            return VerifyStart::Bypassed;
        }

        self.is_verifying = true;
        VerifyStart::Remote(VerifyCodeRequest {
            email: session.email().to_string(),
            code,
        })
    }

    /// Apply the result of the check started by `begin_verify`. Results
    /// with no check in flight are dropped.
    pub fn finish_verify(&mut self, session: &mut OnboardingSession, result: Result<VerifyCodeResponse>) {
        if !self.is_verifying {
            tracing::warn!("dropping verification result with no check in flight");
            return;
        }
        self.is_verifying = false;
        match result {
            Ok(response) if response.success => {
                session.set_step(OnboardingStep::Success);
            }
            Ok(response) => {
                let message = response.message.filter(|m| !m.trim().is_empty());
                self.error = Some(message.unwrap_or_else(|| INVALID_CODE.to_string()));
            }
            Err(err) => {
                self.error = Some(failure_message(&err, VERIFICATION_FAILED));
            }
        }
    }

    pub async fn submit<B>(&mut self, session: &mut OnboardingSession, backend: &B) -> VerifyStart
    where
        B: AuthBackend + ?Sized,
    {
        let start = self.begin_verify(session);
        if let VerifyStart::Remote(request) = &start {
            let result = backend.verify_code(request).await;
            self.finish_verify(session, result);
        }
        start
    }

    /// "Didn't receive the code?" Ignored while a verification is running.
    pub fn resend(&mut self, session: &mut OnboardingSession) -> bool {
        if self.is_verifying {
            return false;
        }
        session.set_step(OnboardingStep::VerifyEmail);
        true
    }
}
