use super::UiIntent;

/// Reached through "Resend". A new code is on its way; the only way forward
/// is back to code entry.
pub fn show(ui: &mut egui::Ui, email: &str) -> Option<UiIntent> {
    let mut intent = None;

    ui.heading("Check Your Inbox");
    ui.horizontal_wrapped(|ui| {
        ui.label("We'll send a new verification code to");
        ui.strong(email);
    });
    ui.add_space(16.0);

    let button = egui::Button::new("Enter code").min_size(egui::vec2(ui.available_width(), 36.0));
    if ui.add(button).clicked() {
        intent = Some(UiIntent::EnterCode);
    }

    intent
}
