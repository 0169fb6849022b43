use log::{error, info, warn};

use crate::api::{ApiError, ApiResult};
use crate::models::{AuthResponse, Post, User, UserWithPosts};
use crate::resource::LoadState;
use crate::routing::Route;

use super::state::{DashboardData, LoadedImage, PostForm, ViewState};
use super::BlogboardApp;

impl BlogboardApp {
    pub(super) fn handle_posts_loaded(&mut self, result: ApiResult<Vec<Post>>) {
        let ViewState::Posts(state) = &mut self.view else {
            return;
        };
        match result {
            Ok(posts) => {
                info!("loaded {} posts", posts.len());
                state.posts = LoadState::Ready(posts);
            }
            Err(err) => {
                let message = err.user_message();
                warn!("failed to load posts: {err}");
                state.posts = LoadState::Failed(message.clone());
                self.toasts.error(message);
            }
        }
    }

    pub(super) fn handle_post_liked(&mut self, post_id: String, result: ApiResult<u64>) {
        let ViewState::Posts(state) = &mut self.view else {
            return;
        };
        state.liking.remove(&post_id);
        match result {
            Ok(likes) => {
                if !state.apply_like(&post_id, likes) {
                    warn!("liked post {post_id} is no longer listed");
                }
            }
            Err(err) => {
                warn!("failed to like post {post_id}: {err}");
                self.toasts.error(err.user_message());
            }
        }
    }

    pub(super) fn handle_dashboard_loaded(&mut self, result: ApiResult<UserWithPosts>) {
        let ViewState::Dashboard(state) = &mut self.view else {
            return;
        };
        state.data.finish(
            result.and_then(|reply| match reply.user {
                Some(user) => Ok(DashboardData::new(user, reply.posts.results)),
                None => Err(ApiError::Missing("user")),
            }),
            dashboard_error,
        );
        if let Some(message) = state.data.error() {
            warn!("dashboard load failed: {message}");
        }
    }

    pub(super) fn handle_post_deleted(&mut self, post_id: String, result: ApiResult<()>) {
        let ViewState::Dashboard(state) = &mut self.view else {
            return;
        };
        state.deleting.remove(&post_id);
        match result {
            Ok(()) => {
                state.action_error = None;
                if let Some(data) = state.data.ready_mut() {
                    data.remove_post(&post_id);
                }
                self.toasts.success("Post deleted");
            }
            Err(err) => {
                let message = err.user_message();
                warn!("failed to delete post {post_id}: {err}");
                state.action_error = Some(message.clone());
                self.toasts.error(message);
            }
        }
    }

    pub(super) fn handle_post_created(&mut self, result: ApiResult<()>) {
        let ViewState::Create(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(()) => {
                state.form = PostForm::default();
                self.toasts.success("Post created successfully!");
                self.navigate(Route::Posts);
            }
            Err(err) => {
                let message = err.user_message();
                state.error = Some(message.clone());
                self.toasts.error(message);
            }
        }
    }

    pub(super) fn handle_post_fetched(&mut self, result: ApiResult<Post>) {
        let ViewState::UpdatePost(state) = &mut self.view else {
            return;
        };
        match result {
            Ok(post) => {
                state.form = PostForm::from_post(&post);
                state.loaded = LoadState::Ready(());
            }
            Err(err) => state.loaded = LoadState::Failed(err.user_message()),
        }
    }

    pub(super) fn handle_post_updated(&mut self, result: ApiResult<()>) {
        let ViewState::UpdatePost(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(()) => {
                self.toasts.success("Post updated");
                self.navigate(Route::Dashboard);
            }
            Err(err) => state.error = Some(err.user_message()),
        }
    }

    pub(super) fn handle_user_fetched(&mut self, result: ApiResult<User>) {
        let ViewState::UpdateUser(state) = &mut self.view else {
            return;
        };
        match result {
            Ok(user) => {
                state.email = user.email;
                state.username = user.username;
                state.loaded = LoadState::Ready(());
            }
            Err(err) => {
                warn!("failed to fetch user {}: {err}", state.user_id);
                state.loaded = LoadState::Failed("Failed to fetch user data.".to_string());
            }
        }
    }

    pub(super) fn handle_user_updated(&mut self, result: ApiResult<()>) {
        let ViewState::UpdateUser(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(()) => {
                state.password.clear();
                self.toasts.success("User updated successfully!");
                self.navigate(Route::Posts);
            }
            Err(err) => state.error = Some(err.user_message()),
        }
    }

    pub(super) fn handle_logged_in(&mut self, result: ApiResult<AuthResponse>) {
        let ViewState::Login(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(reply) => match reply.resolved_user_id() {
                Some(user_id) => {
                    state.form.password.clear();
                    self.start_session(user_id);
                }
                None => {
                    state.error = Some("Login response did not include a user id".to_string());
                }
            },
            Err(err) => state.error = Some(err.user_message()),
        }
    }

    pub(super) fn handle_registered(&mut self, result: ApiResult<AuthResponse>) {
        let ViewState::Register(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(reply) => match reply.resolved_user_id() {
                Some(user_id) => self.start_session(user_id),
                None => {
                    self.toasts
                        .success("Registration successful. Please log in.");
                    self.navigate(Route::Login);
                }
            },
            Err(err) => state.error = Some(err.user_message()),
        }
    }

    pub(super) fn handle_image_loaded(&mut self, url: String, result: Result<LoadedImage, String>) {
        self.image_loading.remove(&url);
        match result {
            Ok(image) => {
                self.image_pending.insert(url, image);
            }
            Err(err) => {
                error!("failed to load image {url}: {err}");
                self.image_errors.insert(url, err);
            }
        }
    }

    fn start_session(&mut self, user_id: String) {
        if let Err(err) = self.session.login(user_id) {
            warn!("session not persisted: {err:#}");
            self.toasts
                .error("Logged in, but the session could not be saved");
        }
        self.navigate(Route::Dashboard);
    }
}

fn dashboard_error(err: &ApiError) -> String {
    if err.is_not_found() {
        "User not found!".to_string()
    } else {
        err.user_message()
    }
}
