use onboarding::{CodeEdit, VerifyCodeStep, CODE_LENGTH};

use super::{UiIntent, ERROR_RED};

fn box_id(index: usize) -> egui::Id {
    egui::Id::new(("verify_code_box", index))
}

fn pasted_text(ui: &egui::Ui) -> Option<String> {
    ui.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Paste(text) => Some(text.clone()),
            _ => None,
        })
    })
}

pub fn show(ui: &mut egui::Ui, step: &mut VerifyCodeStep, email: &str) -> Option<UiIntent> {
    let mut intent = None;
    let mut move_focus = false;

    ui.heading("Verify Your Email");
    ui.horizontal_wrapped(|ui| {
        ui.label("Enter the 6-digit code sent to");
        ui.strong(email);
    });
    ui.add_space(16.0);

    // A paste while the first box has focus is spread over all boxes; the
    // boxes' own edits are ignored for that frame.
    let first_focused = ui.memory(|m| m.has_focus(box_id(0)));
    let paste = if first_focused { pasted_text(ui) } else { None };
    let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.horizontal(|ui| {
        for index in 0..CODE_LENGTH {
            let was_empty = step.code().slot(index).is_none();
            let mut value = step.code().slot(index).map(String::from).unwrap_or_default();

            let response = ui.add_enabled(
                !step.is_verifying(),
                egui::TextEdit::singleline(&mut value)
                    .id(box_id(index))
                    .char_limit(1)
                    .desired_width(36.0)
                    .font(egui::TextStyle::Heading),
            );

            if response.gained_focus() {
                step.set_focus(index);
            }
            if paste.is_none() && response.changed() {
                if let CodeEdit::Applied { focus: Some(_) } = step.input(index, &value) {
                    move_focus = true;
                }
            }
            if response.has_focus() && was_empty && backspace {
                step.backspace(index);
                move_focus = true;
            }
            if response.lost_focus() && enter {
                intent = Some(UiIntent::SubmitCode);
            }
        }
    });

    if let Some(text) = paste {
        if step.paste(0, &text) {
            move_focus = true;
        }
    }
    if move_focus {
        ui.memory_mut(|m| m.request_focus(box_id(step.focus())));
    }

    if let Some(error) = step.error() {
        ui.add_space(8.0);
        ui.colored_label(ERROR_RED, error);
    }
    ui.add_space(16.0);

    let label = if step.is_verifying() { "Verifying..." } else { "Continue" };
    ui.horizontal(|ui| {
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(step.can_submit(), button).clicked() {
            intent = Some(UiIntent::SubmitCode);
        }
        if step.is_verifying() {
            ui.spinner();
        }
    });

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        let resend = egui::Button::new("Didn't receive the code? Resend").frame(false);
        if ui.add_enabled(!step.is_verifying(), resend).clicked() {
            intent = Some(UiIntent::ResendCode);
        }
    });

    intent
}
