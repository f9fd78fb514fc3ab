use std::sync::Arc;

use crate::actions::OnboardingAction;
use crate::client::{AuthBackend, RegistrationReceipt, VerifyCodeRequest, VerifyCodeResponse};
use crate::error::Result;
use crate::forms::{RegistrationRequest, SignInRequest};
use crate::state::{OnboardingSession, OnboardingStep};
use crate::steps::{RegisterStep, SignUpOutcome, VerifyCodeStep, VerifyStart};

/// Filled in by the step switcher when a later step is opened without an email.
pub const TEST_EMAIL: &str = "test@example.com";

/// The view for the current step, with its step-local state.
#[derive(Debug)]
pub enum ActiveStep {
    Register(RegisterStep),
    VerifyEmail,
    VerifyCode(VerifyCodeStep),
    Success,
}

impl ActiveStep {
    pub fn for_step(step: OnboardingStep) -> Self {
        match step {
            OnboardingStep::Register => ActiveStep::Register(RegisterStep::new()),
            OnboardingStep::VerifyEmail => ActiveStep::VerifyEmail,
            OnboardingStep::VerifyCode => ActiveStep::VerifyCode(VerifyCodeStep::new()),
            OnboardingStep::Success => ActiveStep::Success,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        match self {
            ActiveStep::Register(_) => OnboardingStep::Register,
            ActiveStep::VerifyEmail => OnboardingStep::VerifyEmail,
            ActiveStep::VerifyCode(_) => OnboardingStep::VerifyCode,
            ActiveStep::Success => OnboardingStep::Success,
        }
    }
}

/// Owns the onboarding session and renders exactly one step view from it.
pub struct OnboardingFlow<B: AuthBackend + ?Sized> {
    session: OnboardingSession,
    active: ActiveStep,
    backend: Arc<B>,
}

impl<B: AuthBackend + ?Sized> OnboardingFlow<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let session = OnboardingSession::new();
        let active = ActiveStep::for_step(session.current_step());
        Self {
            session,
            active,
            backend,
        }
    }

    pub fn session(&self) -> &OnboardingSession {
        &self.session
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.session.current_step()
    }

    pub fn active(&self) -> &ActiveStep {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveStep {
        &mut self.active
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Rebuild the step view when the session moved to another step. Step-local
    /// data of the old view is dropped.
    fn sync_view(&mut self) {
        let step = self.session.current_step();
        if self.active.step() != step {
            tracing::debug!(%step, "switching step view");
            self.active = ActiveStep::for_step(step);
        }
    }

    pub fn dispatch(&mut self, action: OnboardingAction) {
        self.session.apply(action);
        self.sync_view();
    }

    pub fn set_step(&mut self, step: OnboardingStep) {
        self.dispatch(OnboardingAction::SetStep(step));
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.dispatch(OnboardingAction::SetEmail(email.into()));
    }

    pub fn set_user_id(&mut self, id: impl Into<String>) {
        self.dispatch(OnboardingAction::SetUserId(id.into()));
    }

    pub fn reset_onboarding(&mut self) {
        self.dispatch(OnboardingAction::Reset);
    }

    /// Development step switcher: later steps get a placeholder email when
    /// none was entered.
    pub fn jump_to(&mut self, step: OnboardingStep) {
        if step != OnboardingStep::Register && self.session.email().is_empty() {
            self.set_email(TEST_EMAIL);
        }
        self.set_step(step);
    }

    // --- registration -------------------------------------------------

    pub fn begin_registration(&mut self) -> Option<RegistrationRequest> {
        match &mut self.active {
            ActiveStep::Register(step) => step.begin_sign_up(),
            _ => None,
        }
    }

    /// Apply a registration result. On success the flow, not the register
    /// view, stores the email and moves to code entry.
    pub fn finish_registration(&mut self, result: Result<RegistrationReceipt>) -> bool {
        let ActiveStep::Register(step) = &mut self.active else {
            tracing::warn!("registration result arrived after leaving the register step");
            return false;
        };

        match step.finish_sign_up(result) {
            SignUpOutcome::Registered { email, receipt } => {
                self.set_email(email);
                if let Some(user_id) = receipt.user_id {
                    self.set_user_id(user_id);
                }
                self.set_step(OnboardingStep::VerifyCode);
                true
            }
            SignUpOutcome::Failed | SignUpOutcome::Ignored => false,
        }
    }

    pub async fn submit_registration(&mut self) -> Option<bool> {
        let request = self.begin_registration()?;
        let backend = Arc::clone(&self.backend);
        let result = backend.register(&request).await;
        Some(self.finish_registration(result))
    }

    // --- sign-in ------------------------------------------------------

    pub fn begin_sign_in(&mut self) -> Option<SignInRequest> {
        match &mut self.active {
            ActiveStep::Register(step) => step.begin_sign_in(),
            _ => None,
        }
    }

    pub fn finish_sign_in(&mut self, result: Result<()>) -> bool {
        match &mut self.active {
            ActiveStep::Register(step) => step.finish_sign_in(result),
            _ => false,
        }
    }

    pub async fn submit_sign_in(&mut self) -> Option<bool> {
        let request = self.begin_sign_in()?;
        let backend = Arc::clone(&self.backend);
        let result = backend.sign_in(&request).await;
        Some(self.finish_sign_in(result))
    }

    // --- verification -------------------------------------------------

    /// Returns the request to send when a remote check is needed. The bypass
    /// code and incomplete codes are handled here and return `None`.
    pub fn begin_verification(&mut self) -> Option<VerifyCodeRequest> {
        let start = match &mut self.active {
            ActiveStep::VerifyCode(step) => step.begin_verify(&mut self.session),
            _ => return None,
        };
        self.sync_view();
        match start {
            VerifyStart::Remote(request) => Some(request),
            VerifyStart::Incomplete | VerifyStart::Busy | VerifyStart::Bypassed => None,
        }
    }

    pub fn finish_verification(&mut self, result: Result<VerifyCodeResponse>) {
        match &mut self.active {
            ActiveStep::VerifyCode(step) => step.finish_verify(&mut self.session, result),
            _ => {
                tracing::warn!("verification result arrived after leaving the code step");
                return;
            }
        }
        self.sync_view();
    }

    pub async fn submit_code(&mut self) -> Option<VerifyStart> {
        let start = match &mut self.active {
            ActiveStep::VerifyCode(step) => step.begin_verify(&mut self.session),
            _ => return None,
        };
        if let VerifyStart::Remote(request) = &start {
            let backend = Arc::clone(&self.backend);
            let result = backend.verify_code(request).await;
            if let ActiveStep::VerifyCode(step) = &mut self.active {
                step.finish_verify(&mut self.session, result);
            }
        }
        self.sync_view();
        Some(start)
    }

    pub fn resend_code(&mut self) -> bool {
        let resent = match &mut self.active {
            ActiveStep::VerifyCode(step) => step.resend(&mut self.session),
            _ => false,
        };
        self.sync_view();
        resent
    }
}
