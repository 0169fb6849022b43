use eframe::egui::{self, Align2, Context, RichText};

use crate::config::DEFAULT_API_URL;
use crate::routing::Route;

use super::super::{BlogboardApp, ViewAction};

impl BlogboardApp {
    pub(crate) fn render_nav(&mut self, ctx: &Context) -> ViewAction {
        let mut action = ViewAction::None;
        let current = self.current_route();
        let logged_in = self.session.is_authenticated();

        egui::TopBottomPanel::top("top_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(current == Some(Route::Posts), RichText::new("Posts").strong())
                    .clicked()
                {
                    action = ViewAction::Navigate(Route::Posts);
                }
                if logged_in {
                    if ui
                        .selectable_label(current == Some(Route::Dashboard), "My Account")
                        .clicked()
                    {
                        action = ViewAction::Navigate(Route::Dashboard);
                    }
                } else if ui
                    .selectable_label(current == Some(Route::Register), "Register")
                    .clicked()
                {
                    action = ViewAction::Navigate(Route::Register);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if logged_in {
                        if ui.button("Logout").clicked() {
                            action = ViewAction::Logout;
                        }
                    } else if ui.button("Login").clicked() {
                        action = ViewAction::Navigate(Route::Login);
                    }
                    if ui.selectable_label(self.show_settings, "⚙").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
            });
        });

        action
    }

    pub(crate) fn render_settings(&mut self, ctx: &Context) {
        if !self.show_settings {
            return;
        }

        let mut apply = false;
        egui::Window::new("Settings")
            .open(&mut self.show_settings)
            .resizable(false)
            .default_width(420.0)
            .anchor(Align2::RIGHT_TOP, egui::vec2(-12.0, 40.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("API Base URL");
                    ui.text_edit_singleline(&mut self.base_url_input);
                });
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        apply = true;
                    }
                    if ui.button("Reset to Default").clicked() {
                        self.base_url_input = DEFAULT_API_URL.to_string();
                    }
                });
                ui.label(
                    RichText::new(format!("Currently using {}", self.api.base_url()))
                        .small()
                        .color(egui::Color32::GRAY),
                );
            });

        if apply {
            self.apply_base_url();
        }
    }
}
