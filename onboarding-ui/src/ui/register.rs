use onboarding::{AuthTab, RegisterStep};

use super::{UiIntent, ERROR_RED, OK_GREEN};

/// Static welcome copy shown beside the form on wide windows.
pub fn hero(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new("Welcome to KAZI").size(40.0).strong());
        ui.add_space(12.0);
        ui.label(egui::RichText::new("Connecting you to endless possibilities.").size(20.0));
    });
    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("Secure, fast, reliable.").size(18.0));
        ui.label(egui::RichText::new("Effortless Connections").size(28.0).strong());
    });
}

pub fn show(ui: &mut egui::Ui, step: &mut RegisterStep) -> Option<UiIntent> {
    let mut intent = None;

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("KAZI").size(26.0).strong());
    });
    ui.add_space(16.0);

    ui.horizontal(|ui| {
        let tab = step.tab();
        if ui.selectable_label(tab == AuthTab::SignUp, "Sign Up").clicked() {
            step.select_tab(AuthTab::SignUp);
        }
        if ui.selectable_label(tab == AuthTab::SignIn, "Sign In").clicked() {
            step.select_tab(AuthTab::SignIn);
        }
    });
    ui.separator();

    let enabled = !step.is_submitting() && step.alert().is_none();
    ui.add_enabled_ui(enabled, |ui| match step.tab() {
        AuthTab::SignUp => intent = sign_up_form(ui, step),
        AuthTab::SignIn => intent = sign_in_form(ui, step),
    });

    intent
}

fn password_field(ui: &mut egui::Ui, value: &mut String, visible: &mut bool) -> egui::Response {
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(value)
                .password(!*visible)
                .hint_text("asdfd12$A")
                .desired_width(ui.available_width() - 40.0),
        );
        ui.toggle_value(visible, if *visible { "🙈" } else { "👁" });
        response
    })
    .inner
}

fn sign_up_form(ui: &mut egui::Ui, step: &mut RegisterStep) -> Option<UiIntent> {
    let mut submit = false;

    ui.label("First Name");
    ui.add(egui::TextEdit::singleline(&mut step.draft.first_name).hint_text("John"));
    ui.label("Last Name");
    ui.add(egui::TextEdit::singleline(&mut step.draft.last_name).hint_text("Doe"));
    ui.label("Email");
    ui.add(egui::TextEdit::singleline(&mut step.draft.email).hint_text("johndoe@gmail.com"));

    ui.label("Password");
    let password = password_field(ui, &mut step.draft.password, &mut step.show_password);
    if password.lost_focus() {
        step.touch_password();
    }
    if step.shows_password_checks() {
        for (label, ok) in step.draft.password_policy().checks() {
            let (mark, color) = if ok { ("✓", OK_GREEN) } else { ("✗", ERROR_RED) };
            ui.colored_label(color, format!("{} {}", mark, label));
        }
    }

    ui.label("Confirm Password");
    let confirm = password_field(ui, &mut step.draft.confirm_password, &mut step.show_confirm_password);
    if step.draft.shows_mismatch() {
        ui.colored_label(ERROR_RED, "Passwords do not match");
    }

    ui.checkbox(&mut step.draft.agree_to_terms, "I agree to terms & conditions");
    ui.add_space(8.0);

    let label = if step.is_submitting() { "Creating Account..." } else { "Create Account" };
    ui.horizontal(|ui| {
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(step.can_submit_sign_up(), button).clicked() {
            submit = true;
        }
        if step.is_submitting() {
            ui.spinner();
        }
    });

    let pressed_enter = confirm.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    (submit || pressed_enter).then_some(UiIntent::SubmitSignUp)
}

fn sign_in_form(ui: &mut egui::Ui, step: &mut RegisterStep) -> Option<UiIntent> {
    let mut changed = false;
    let mut submit = false;

    ui.label("Email");
    changed |= ui
        .add(egui::TextEdit::singleline(&mut step.sign_in.email).hint_text("johndoe"))
        .changed();

    ui.label("Password");
    let password = password_field(ui, &mut step.sign_in.password, &mut step.show_sign_in_password);
    changed |= password.changed();
    if let Some(error) = step.sign_in_error() {
        ui.colored_label(ERROR_RED, format!("⚠ {}", error));
    }

    ui.horizontal(|ui| {
        changed |= ui.checkbox(&mut step.sign_in.remember_me, "Remember me").changed();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Forgot Password?");
        });
    });
    if changed {
        step.on_sign_in_changed();
    }
    ui.add_space(8.0);

    let label = if step.is_submitting() { "Signing In..." } else { "Continue" };
    ui.horizontal(|ui| {
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(step.can_submit_sign_in(), button).clicked() {
            submit = true;
        }
        if step.is_submitting() {
            ui.spinner();
        }
    });

    let pressed_enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    (submit || pressed_enter).then_some(UiIntent::SubmitSignIn)
}

/// Modal for a failed registration; the form stays disabled until dismissed.
pub fn show_alert(ctx: &egui::Context, step: &mut RegisterStep) {
    let Some(message) = step.alert().map(str::to_owned) else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Registration failed")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        step.dismiss_alert();
    }
}
