use eframe::egui::{self, Color32};

use crate::resource::LoadState;
use crate::routing::Route;

use super::super::state::{PostForm, PostFormState, UpdatePostState, UpdateUserState};
use super::super::ViewAction;

const FORM_WIDTH: f32 = 440.0;

fn post_fields(ui: &mut egui::Ui, form: &mut PostForm) {
    ui.label("Title");
    ui.add(egui::TextEdit::singleline(&mut form.title).desired_width(f32::INFINITY));
    ui.add_space(6.0);
    ui.label("Description");
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .desired_rows(6)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    ui.label("Image URL");
    ui.add(
        egui::TextEdit::singleline(&mut form.img)
            .hint_text("https://…")
            .desired_width(f32::INFINITY),
    );
}

fn submit_row(ui: &mut egui::Ui, submitting: bool, label: &str) -> bool {
    ui.add_space(12.0);
    if submitting {
        ui.add(egui::Spinner::new());
        false
    } else {
        ui.button(label).clicked()
    }
}

pub(crate) fn render_create_post(ui: &mut egui::Ui, state: &mut PostFormState) -> ViewAction {
    let mut action = ViewAction::None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.heading("Create a New Post");
        ui.add_space(8.0);
        ui.vertical(|ui| {
            if let Some(err) = &state.error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            post_fields(ui, &mut state.form);
            if submit_row(ui, state.submitting, "Create Post") {
                action = ViewAction::Submit;
            }
        });
    });
    action
}

pub(crate) fn render_update_post(ui: &mut egui::Ui, state: &mut UpdatePostState) -> ViewAction {
    let mut action = ViewAction::None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.heading("Update Post");
        ui.add_space(8.0);
        match &state.loaded {
            LoadState::Idle | LoadState::Loading => {
                ui.add(egui::Spinner::new());
            }
            LoadState::Failed(err) => {
                ui.colored_label(Color32::LIGHT_RED, format!("Error: {err}"));
                ui.horizontal(|ui| {
                    if ui.button("Retry").clicked() {
                        action = ViewAction::Reload;
                    }
                    if ui.button("Back to Dashboard").clicked() {
                        action = ViewAction::Navigate(Route::Dashboard);
                    }
                });
            }
            LoadState::Ready(()) => {
                ui.vertical(|ui| {
                    if let Some(err) = &state.error {
                        ui.colored_label(Color32::LIGHT_RED, err);
                    }
                    post_fields(ui, &mut state.form);
                    if submit_row(ui, state.submitting, "Update Post") {
                        action = ViewAction::Submit;
                    }
                });
            }
        }
    });
    action
}

pub(crate) fn render_update_user(ui: &mut egui::Ui, state: &mut UpdateUserState) -> ViewAction {
    let mut action = ViewAction::None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.heading("Update User Information");
        ui.add_space(8.0);
        if state.loaded.is_loading() {
            ui.add(egui::Spinner::new());
            return;
        }
        ui.vertical(|ui| {
            // A failed prefill still leaves the form usable.
            if let Some(err) = state.loaded.error() {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            if let Some(err) = &state.error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            ui.label("Email");
            ui.add(egui::TextEdit::singleline(&mut state.email).desired_width(f32::INFINITY));
            ui.add_space(6.0);
            ui.label("Password");
            ui.add(
                egui::TextEdit::singleline(&mut state.password)
                    .password(true)
                    .hint_text("Leave blank to keep the current password")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(6.0);
            ui.label("Name");
            ui.add(egui::TextEdit::singleline(&mut state.username).desired_width(f32::INFINITY));
            if submit_row(ui, state.submitting, "Update") {
                action = ViewAction::Submit;
            }
        });
    });
    action
}
