use log::debug;

use crate::api::ApiResult;
use crate::models::{AuthResponse, Post, User, UserWithPosts};
use crate::resource::ViewToken;

use super::state::LoadedImage;
use super::BlogboardApp;

pub enum AppMessage {
    PostsLoaded {
        token: ViewToken,
        result: ApiResult<Vec<Post>>,
    },
    PostLiked {
        token: ViewToken,
        post_id: String,
        result: ApiResult<u64>,
    },
    DashboardLoaded {
        token: ViewToken,
        result: ApiResult<UserWithPosts>,
    },
    PostDeleted {
        token: ViewToken,
        post_id: String,
        result: ApiResult<()>,
    },
    PostCreated {
        token: ViewToken,
        result: ApiResult<()>,
    },
    PostFetched {
        token: ViewToken,
        result: ApiResult<Post>,
    },
    PostUpdated {
        token: ViewToken,
        result: ApiResult<()>,
    },
    UserFetched {
        token: ViewToken,
        result: ApiResult<User>,
    },
    UserUpdated {
        token: ViewToken,
        result: ApiResult<()>,
    },
    LoggedIn {
        token: ViewToken,
        result: ApiResult<AuthResponse>,
    },
    Registered {
        token: ViewToken,
        result: ApiResult<AuthResponse>,
    },
    // Images are cached app-wide, so they outlive the view that asked.
    ImageLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
}

impl AppMessage {
    pub fn token(&self) -> Option<ViewToken> {
        match self {
            AppMessage::PostsLoaded { token, .. }
            | AppMessage::PostLiked { token, .. }
            | AppMessage::DashboardLoaded { token, .. }
            | AppMessage::PostDeleted { token, .. }
            | AppMessage::PostCreated { token, .. }
            | AppMessage::PostFetched { token, .. }
            | AppMessage::PostUpdated { token, .. }
            | AppMessage::UserFetched { token, .. }
            | AppMessage::UserUpdated { token, .. }
            | AppMessage::LoggedIn { token, .. }
            | AppMessage::Registered { token, .. } => Some(*token),
            AppMessage::ImageLoaded { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppMessage::PostsLoaded { .. } => "PostsLoaded",
            AppMessage::PostLiked { .. } => "PostLiked",
            AppMessage::DashboardLoaded { .. } => "DashboardLoaded",
            AppMessage::PostDeleted { .. } => "PostDeleted",
            AppMessage::PostCreated { .. } => "PostCreated",
            AppMessage::PostFetched { .. } => "PostFetched",
            AppMessage::PostUpdated { .. } => "PostUpdated",
            AppMessage::UserFetched { .. } => "UserFetched",
            AppMessage::UserUpdated { .. } => "UserUpdated",
            AppMessage::LoggedIn { .. } => "LoggedIn",
            AppMessage::Registered { .. } => "Registered",
            AppMessage::ImageLoaded { .. } => "ImageLoaded",
        }
    }
}

/// Drains the channel. Responses addressed to a view that has since been
/// left are dropped without touching any state.
pub(super) fn process_messages(app: &mut BlogboardApp) {
    while let Ok(message) = app.rx.try_recv() {
        if let Some(token) = message.token() {
            if app.view.token() != Some(token) {
                debug!(
                    "discarding stale {} response for view {}",
                    message.kind(),
                    token.raw()
                );
                continue;
            }
        }
        match message {
            AppMessage::PostsLoaded { result, .. } => app.handle_posts_loaded(result),
            AppMessage::PostLiked {
                post_id, result, ..
            } => app.handle_post_liked(post_id, result),
            AppMessage::DashboardLoaded { result, .. } => app.handle_dashboard_loaded(result),
            AppMessage::PostDeleted {
                post_id, result, ..
            } => app.handle_post_deleted(post_id, result),
            AppMessage::PostCreated { result, .. } => app.handle_post_created(result),
            AppMessage::PostFetched { result, .. } => app.handle_post_fetched(result),
            AppMessage::PostUpdated { result, .. } => app.handle_post_updated(result),
            AppMessage::UserFetched { result, .. } => app.handle_user_fetched(result),
            AppMessage::UserUpdated { result, .. } => app.handle_user_updated(result),
            AppMessage::LoggedIn { result, .. } => app.handle_logged_in(result),
            AppMessage::Registered { result, .. } => app.handle_registered(result),
            AppMessage::ImageLoaded { url, result } => app.handle_image_loaded(url, result),
        }
    }
}
