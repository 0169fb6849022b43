use std::sync::mpsc::Sender;
use std::thread;

use eframe::egui;
use log::{error, info};

use crate::api::{ApiClient, ApiError};
use crate::models::{
    CreatePostInput, LoginInput, RegisterInput, UpdatePostInput, UpdateUserInput,
};
use crate::resource::ViewToken;

use super::messages::AppMessage;
use super::state::LoadedImage;

/// Sending half handed to background threads. Wakes the UI after each
/// delivery so the response shows up without waiting for input.
#[derive(Clone)]
pub struct Outbox {
    tx: Sender<AppMessage>,
    ctx: Option<egui::Context>,
}

impl Outbox {
    pub fn new(tx: Sender<AppMessage>, ctx: Option<egui::Context>) -> Self {
        Self { tx, ctx }
    }

    pub fn send(&self, message: AppMessage) {
        let kind = message.kind();
        if self.tx.send(message).is_err() {
            error!("failed to send {kind} message");
            return;
        }
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }
}

pub fn load_posts(client: ApiClient, outbox: Outbox, token: ViewToken) {
    thread::spawn(move || {
        let result = client.list_posts();
        outbox.send(AppMessage::PostsLoaded { token, result });
    });
}

pub fn like_post(
    client: ApiClient,
    outbox: Outbox,
    token: ViewToken,
    post_id: String,
    user_id: Option<String>,
) {
    thread::spawn(move || {
        let result = client.like_post(&post_id, user_id.as_deref());
        outbox.send(AppMessage::PostLiked {
            token,
            post_id,
            result,
        });
    });
}

pub fn load_dashboard(client: ApiClient, outbox: Outbox, token: ViewToken, user_id: String) {
    thread::spawn(move || {
        let result = client.get_user_with_posts(&user_id);
        outbox.send(AppMessage::DashboardLoaded { token, result });
    });
}

pub fn delete_post(
    client: ApiClient,
    outbox: Outbox,
    token: ViewToken,
    user_id: String,
    post_id: String,
) {
    thread::spawn(move || {
        let result = client.delete_post(&user_id, &post_id);
        outbox.send(AppMessage::PostDeleted {
            token,
            post_id,
            result,
        });
    });
}

pub fn create_post(client: ApiClient, outbox: Outbox, token: ViewToken, payload: CreatePostInput) {
    thread::spawn(move || {
        let result = client.create_post(&payload);
        outbox.send(AppMessage::PostCreated { token, result });
    });
}

pub fn load_post(client: ApiClient, outbox: Outbox, token: ViewToken, post_id: String) {
    thread::spawn(move || {
        let result = client.get_post(&post_id);
        outbox.send(AppMessage::PostFetched { token, result });
    });
}

pub fn update_post(
    client: ApiClient,
    outbox: Outbox,
    token: ViewToken,
    post_id: String,
    payload: UpdatePostInput,
) {
    thread::spawn(move || {
        let result = client.update_post(&post_id, &payload);
        outbox.send(AppMessage::PostUpdated { token, result });
    });
}

pub fn load_user(client: ApiClient, outbox: Outbox, token: ViewToken, user_id: String) {
    thread::spawn(move || {
        let result = client
            .get_user_with_posts(&user_id)
            .and_then(|reply| reply.user.ok_or(ApiError::Missing("user")));
        outbox.send(AppMessage::UserFetched { token, result });
    });
}

pub fn update_user(
    client: ApiClient,
    outbox: Outbox,
    token: ViewToken,
    user_id: String,
    payload: UpdateUserInput,
) {
    thread::spawn(move || {
        let result = client.update_user(&user_id, &payload);
        outbox.send(AppMessage::UserUpdated { token, result });
    });
}

pub fn login(client: ApiClient, outbox: Outbox, token: ViewToken, payload: LoginInput) {
    thread::spawn(move || {
        let result = client.login(&payload);
        outbox.send(AppMessage::LoggedIn { token, result });
    });
}

pub fn register(client: ApiClient, outbox: Outbox, token: ViewToken, payload: RegisterInput) {
    thread::spawn(move || {
        let result = client.register(&payload);
        outbox.send(AppMessage::Registered { token, result });
    });
}

pub fn download_image(client: ApiClient, outbox: Outbox, url: String) {
    thread::spawn(move || {
        info!("downloading image from {url}");
        let result = client
            .download(&url)
            .map_err(|err| err.user_message())
            .and_then(|bytes| {
                let decoded = image::load_from_memory(&bytes)
                    .map_err(|err| format!("Image decode error: {err}"))?;
                let rgba = decoded.to_rgba8();
                Ok(LoadedImage {
                    size: [rgba.width() as usize, rgba.height() as usize],
                    pixels: rgba.into_raw(),
                })
            });
        outbox.send(AppMessage::ImageLoaded { url, result });
    });
}
