use eframe::egui::{self, Color32, RichText};

use crate::models::Post;
use crate::resource::LoadState;
use crate::routing::Route;

use super::super::state::DashboardState;
use super::super::{format_timestamp, BlogboardApp, ViewAction};
use super::charts;

impl BlogboardApp {
    pub(crate) fn render_dashboard(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut DashboardState,
    ) -> ViewAction {
        let mut action = ViewAction::None;

        let data = match &state.data {
            LoadState::Idle | LoadState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading user details and posts...");
                });
                return action;
            }
            LoadState::Failed(err) => {
                ui.vertical_centered(|ui| {
                    ui.colored_label(Color32::LIGHT_RED, format!("Error: {err}"));
                    if ui.button("Retry").clicked() {
                        action = ViewAction::Reload;
                    }
                });
                return action;
            }
            LoadState::Ready(data) => data.clone(),
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(2, |columns| {
                let left = &mut columns[0];
                left.group(|ui| {
                    ui.heading("User Profile");
                    ui.label(format!("ID: {}", data.user.id));
                    ui.label(format!("Username: {}", data.user.username));
                    ui.label(format!("Email: {}", data.user.email));
                    if ui.button("Update Profile").clicked() {
                        action = ViewAction::Navigate(Route::UpdateUser(state.user_id.clone()));
                    }
                });
                left.add_space(12.0);
                left.group(|ui| {
                    charts::bar_chart(ui, &data.rows);
                    ui.add_space(16.0);
                    charts::line_chart(ui, &data.rows);
                });

                let right = &mut columns[1];
                right.heading("Posts");
                if let Some(err) = &state.action_error {
                    right.colored_label(Color32::LIGHT_RED, err);
                }
                if data.posts.is_empty() {
                    right.label("No posts found.");
                }
                for post in &data.posts {
                    let deleting = state.deleting.contains(&post.id);
                    if let Some(post_action) = self.render_owned_post(right, post, deleting) {
                        action = post_action;
                    }
                    right.add_space(8.0);
                }
            });
        });

        action
    }

    fn render_owned_post(
        &mut self,
        ui: &mut egui::Ui,
        post: &Post,
        deleting: bool,
    ) -> Option<ViewAction> {
        let mut action = None;
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(egui::vec2(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if let Some(img) = post.image_url() {
                    let alt = if post.title.is_empty() { "Post Image" } else { &post.title };
                    self.render_post_image(ui, img, alt, 280.0);
                }
                let title = if post.title.is_empty() { "Post Title" } else { &post.title };
                ui.label(RichText::new(title).heading().strong());
                let description = if post.description.is_empty() {
                    "Post Content"
                } else {
                    &post.description
                };
                ui.label(description);
                ui.horizontal(|ui| {
                    let date = post.date.as_deref().map(format_timestamp);
                    ui.label(format!("Date: {}", date.as_deref().unwrap_or("Post Date")));
                    ui.label(format!("Likes: {}", post.likes));
                });
                ui.horizontal(|ui| {
                    if deleting {
                        ui.add(egui::Spinner::new());
                    } else if ui
                        .button(RichText::new("Delete").color(Color32::LIGHT_RED))
                        .clicked()
                    {
                        action = Some(ViewAction::Delete(post.id.clone()));
                    }
                    if ui.button("Edit").clicked() {
                        action = Some(ViewAction::Navigate(Route::UpdatePost(post.id.clone())));
                    }
                });
            });
        action
    }
}
