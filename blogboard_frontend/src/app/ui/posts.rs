use eframe::egui::{self, Color32, RichText};

use crate::models::Post;
use crate::resource::LoadState;
use crate::routing::Route;

use super::super::state::PostListState;
use super::super::{format_timestamp, BlogboardApp, ViewAction};

impl BlogboardApp {
    pub(crate) fn render_posts(&mut self, ui: &mut egui::Ui, state: &mut PostListState) -> ViewAction {
        let mut action = ViewAction::None;

        ui.horizontal(|ui| {
            ui.heading("All Posts");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Create Blog").clicked() {
                    action = ViewAction::Navigate(Route::Create);
                }
            });
        });
        ui.separator();

        match &state.posts {
            LoadState::Idle | LoadState::Loading => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading posts...");
                });
                return action;
            }
            LoadState::Failed(err) => {
                ui.colored_label(Color32::LIGHT_RED, err);
                if ui.button("Retry").clicked() {
                    action = ViewAction::Reload;
                }
                ui.add_space(12.0);
                ui.label("No posts found.");
                return action;
            }
            LoadState::Ready(posts) if posts.is_empty() => {
                ui.label("No posts found.");
                return action;
            }
            LoadState::Ready(_) => {}
        }

        let can_like = self.session.is_authenticated();
        let posts = state.posts.ready().cloned().unwrap_or_default();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for post in &posts {
                let liking = state.liking.contains(&post.id);
                if let Some(post_action) = self.render_post_card(ui, post, can_like, liking) {
                    action = post_action;
                }
                ui.add_space(8.0);
            }
        });

        action
    }

    fn render_post_card(
        &mut self,
        ui: &mut egui::Ui,
        post: &Post,
        can_like: bool,
        liking: bool,
    ) -> Option<ViewAction> {
        let mut action = None;
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(egui::vec2(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if let Some(img) = post.image_url() {
                    let alt = if post.title.is_empty() { "Post Image" } else { &post.title };
                    self.render_post_image(ui, img, alt, 320.0);
                }
                ui.label(RichText::new(&post.title).heading().strong());
                ui.label(&post.description);
                ui.horizontal(|ui| {
                    if let Some(date) = &post.date {
                        ui.label(RichText::new(format_timestamp(date)).small());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{} likes", post.likes));
                    });
                });
                ui.label(format!("Posted by: {}", post.username));
                if can_like {
                    ui.add_enabled_ui(!liking, |ui| {
                        if ui.button("👍 Like Post").clicked() {
                            action = Some(ViewAction::Like(post.id.clone()));
                        }
                    });
                }
            });
        action
    }
}
