use super::OK_GREEN;

pub fn show(ui: &mut egui::Ui, email: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new("✓").size(48.0).color(OK_GREEN));
        ui.heading("Account Created");
        ui.add_space(8.0);
        if email.is_empty() {
            ui.label("Your email has been verified. Welcome to KAZI.");
        } else {
            ui.label(format!("{} has been verified. Welcome to KAZI.", email));
        }
    });
}
