use eframe::egui::{self, Color32};

use crate::routing::Route;

use super::super::state::{LoginState, RegisterState};
use super::super::ViewAction;

const FORM_WIDTH: f32 = 360.0;

pub(crate) fn render_login(ui: &mut egui::Ui, state: &mut LoginState) -> ViewAction {
    let mut action = ViewAction::None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.heading("Login");
        ui.add_space(8.0);
        ui.vertical(|ui| {
            if let Some(err) = &state.error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            ui.label("Email");
            ui.add(egui::TextEdit::singleline(&mut state.form.email).desired_width(f32::INFINITY));
            ui.label("Password");
            let password = ui.add(
                egui::TextEdit::singleline(&mut state.form.password)
                    .password(true)
                    .desired_width(f32::INFINITY),
            );
            let pressed_enter =
                password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if state.submitting {
                    ui.add(egui::Spinner::new());
                } else if ui.button("Login").clicked() || pressed_enter {
                    action = ViewAction::Submit;
                }
                if ui.link("No account? Register").clicked() {
                    action = ViewAction::Navigate(Route::Register);
                }
            });
        });
    });
    action
}

pub(crate) fn render_register(ui: &mut egui::Ui, state: &mut RegisterState) -> ViewAction {
    let mut action = ViewAction::None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.heading("Register");
        ui.add_space(8.0);
        ui.vertical(|ui| {
            if let Some(err) = &state.error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            ui.label("Username");
            ui.add(egui::TextEdit::singleline(&mut state.username).desired_width(f32::INFINITY));
            ui.label("Email");
            ui.add(egui::TextEdit::singleline(&mut state.email).desired_width(f32::INFINITY));
            ui.label("Password");
            ui.add(
                egui::TextEdit::singleline(&mut state.password)
                    .password(true)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if state.submitting {
                    ui.add(egui::Spinner::new());
                } else if ui.button("Register").clicked() {
                    action = ViewAction::Submit;
                }
                if ui.link("Already registered? Login").clicked() {
                    action = ViewAction::Navigate(Route::Login);
                }
            });
        });
    });
    action
}
