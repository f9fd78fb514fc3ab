use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actions::OnboardingAction;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStep {
    #[default]
    Register,
    VerifyEmail,
    VerifyCode,
    Success,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Register,
        OnboardingStep::VerifyEmail,
        OnboardingStep::VerifyCode,
        OnboardingStep::Success,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OnboardingStep::Register => "register",
            OnboardingStep::VerifyEmail => "verify-email",
            OnboardingStep::VerifyCode => "verify-code",
            OnboardingStep::Success => "success",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OnboardingStep::Register => "Register",
            OnboardingStep::VerifyEmail => "Verify Email",
            OnboardingStep::VerifyCode => "Verify Code",
            OnboardingStep::Success => "Success",
        }
    }

    pub fn progress_percentage(self) -> u8 {
        match self {
            OnboardingStep::Register => 25,
            OnboardingStep::VerifyEmail => 50,
            OnboardingStep::VerifyCode => 75,
            OnboardingStep::Success => 100,
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OnboardingStep::ALL
            .into_iter()
            .find(|step| step.as_str() == s.trim())
            .ok_or_else(|| format!("unknown onboarding step: {}", s))
    }
}

/// Session-scoped onboarding state. Fields are only written through the
/// transition methods below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnboardingSession {
    current_step: OnboardingStep,
    email: String,
    user_id: Option<String>,
}

impl OnboardingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    // Unconditional: no check that the email is set before verify-code/success.
    pub fn set_step(&mut self, step: OnboardingStep) {
        if self.current_step != step {
            tracing::info!(from = %self.current_step, to = %step, "onboarding step changed");
        }
        self.current_step = step;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        tracing::debug!("onboarding email updated");
    }

    pub fn set_user_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(user_id = %id, "onboarding user id updated");
        self.user_id = Some(id);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        tracing::info!("onboarding state reset");
    }

    pub fn apply(&mut self, action: OnboardingAction) {
        tracing::debug!("applying action: {}", action.description());
        match action {
            OnboardingAction::SetStep(step) => self.set_step(step),
            OnboardingAction::SetEmail(email) => self.set_email(email),
            OnboardingAction::SetUserId(id) => self.set_user_id(id),
            OnboardingAction::Reset => self.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_register() {
        let session = OnboardingSession::new();
        assert_eq!(session.current_step(), OnboardingStep::Register);
        assert_eq!(session.email(), "");
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn set_step_accepts_any_step_without_email() {
        let mut session = OnboardingSession::new();
        session.set_step(OnboardingStep::Success);
        assert_eq!(session.current_step(), OnboardingStep::Success);
        assert_eq!(session.email(), "");
    }

    #[test]
    fn reset_restores_initial_state_from_anywhere() {
        for step in OnboardingStep::ALL {
            let mut session = OnboardingSession::new();
            session.set_email("jane@example.com");
            session.set_user_id("usr_42");
            session.set_step(step);

            session.reset();
            assert_eq!(session, OnboardingSession::new());
        }
    }

    #[test]
    fn apply_matches_direct_calls() {
        let mut via_actions = OnboardingSession::new();
        via_actions.apply(OnboardingAction::SetEmail("a@b.co".into()));
        via_actions.apply(OnboardingAction::SetUserId("u1".into()));
        via_actions.apply(OnboardingAction::SetStep(OnboardingStep::VerifyCode));

        let mut direct = OnboardingSession::new();
        direct.set_email("a@b.co");
        direct.set_user_id("u1");
        direct.set_step(OnboardingStep::VerifyCode);

        assert_eq!(via_actions, direct);

        via_actions.apply(OnboardingAction::Reset);
        assert_eq!(via_actions, OnboardingSession::new());
    }

    #[test]
    fn step_names_round_trip_through_from_str() {
        for step in OnboardingStep::ALL {
            assert_eq!(step.as_str().parse::<OnboardingStep>(), Ok(step));
        }
        assert!("dashboard".parse::<OnboardingStep>().is_err());
    }

    #[test]
    fn step_serializes_kebab_case() {
        let json = serde_json::to_string(&OnboardingStep::VerifyEmail).unwrap();
        assert_eq!(json, "\"verify-email\"");
    }
}
