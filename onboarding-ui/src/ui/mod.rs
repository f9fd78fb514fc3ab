// Pure render functions, one module per step. They read the step view model,
// edit its local fields and report what the user asked for; the app applies
// intents to the flow after the frame is laid out. No direct backend calls.

pub mod register;
pub mod step_tester;
pub mod success;
pub mod verify_code;
pub mod verify_email;

use onboarding::OnboardingStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIntent {
    SubmitSignUp,
    SubmitSignIn,
    SubmitCode,
    ResendCode,
    EnterCode,
    JumpTo(OnboardingStep),
}

pub(crate) const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
pub(crate) const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
