use super::state::OnboardingStep;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingAction {
    SetStep(OnboardingStep),
    SetEmail(String),
    SetUserId(String),
    Reset,
}

impl OnboardingAction {
    pub fn description(&self) -> &'static str {
        match self {
            OnboardingAction::SetStep(_) => "Moving to another step",
            OnboardingAction::SetEmail(_) => "Updating email",
            OnboardingAction::SetUserId(_) => "Updating user id",
            OnboardingAction::Reset => "Resetting onboarding",
        }
    }
}
