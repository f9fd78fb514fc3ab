use onboarding::OnboardingStep;

use super::UiIntent;

/// Development-only panel for jumping between steps.
pub fn show(ctx: &egui::Context, current: OnboardingStep) -> Option<UiIntent> {
    let mut intent = None;

    egui::Window::new("🔧 Dev Tools")
        .resizable(false)
        .collapsible(true)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            ui.small(format!("Current: {}", current));
            ui.add_space(4.0);

            let targets = [
                (OnboardingStep::Register, current == OnboardingStep::Register),
                (
                    OnboardingStep::VerifyCode,
                    matches!(current, OnboardingStep::VerifyCode | OnboardingStep::VerifyEmail),
                ),
                (OnboardingStep::Success, current == OnboardingStep::Success),
            ];
            for (step, selected) in targets {
                if ui.selectable_label(selected, step.label()).clicked() {
                    intent = Some(UiIntent::JumpTo(step));
                }
            }
        });

    intent
}
