use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context, TextureHandle};
use log::{info, warn};

use crate::api::{ApiClient, ApiResult};
use crate::config::FrontendConfig;
use crate::models::{CreatePostInput, LoginInput, RegisterInput, UpdateUserInput};
use crate::resource::ViewToken;
use crate::routing::{self, Navigation, Route};
use crate::session::{FileSessionStore, Session};
use crate::validation;

mod handlers;
mod messages;
mod state;
mod tasks;
mod toasts;
mod ui;

use messages::AppMessage;
use state::{
    DashboardState, LoadedImage, LoginState, PostFormState, PostListState, RegisterState,
    UpdatePostState, UpdateUserState, ViewState,
};
use tasks::Outbox;
use toasts::Toasts;

/// What a rendered view asks the app to do once its state is put back.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    None,
    Navigate(Route),
    Reload,
    Like(String),
    Delete(String),
    Submit,
    Logout,
}

pub struct BlogboardApp {
    api: ApiClient,
    outbox: Outbox,
    rx: Receiver<AppMessage>,
    session: Session,
    view: ViewState,
    toasts: Toasts,
    base_url_input: String,
    show_settings: bool,
    image_textures: HashMap<String, TextureHandle>,
    image_loading: HashSet<String>,
    image_pending: HashMap<String, LoadedImage>,
    image_errors: HashMap<String, String>,
}

impl BlogboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: FrontendConfig) -> ApiResult<Self> {
        let session = Session::restore(Box::new(FileSessionStore::new(&config.session_file)));
        let mut app = Self::with_parts(&config, session, Some(cc.egui_ctx.clone()))?;
        app.navigate_path("/");
        Ok(app)
    }

    /// Builds the app without touching the window or starting any request.
    pub fn with_parts(
        config: &FrontendConfig,
        session: Session,
        ctx: Option<Context>,
    ) -> ApiResult<Self> {
        let api = ApiClient::new(config.api_base_url.clone())?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            base_url_input: api.base_url().to_string(),
            api,
            outbox: Outbox::new(tx, ctx),
            rx,
            session,
            view: ViewState::Blank,
            toasts: Toasts::new(config.toast_duration()),
            show_settings: false,
            image_textures: HashMap::new(),
            image_loading: HashSet::new(),
            image_pending: HashMap::new(),
            image_errors: HashMap::new(),
        })
    }

    pub fn current_route(&self) -> Option<Route> {
        self.view.route()
    }

    pub fn navigate_path(&mut self, path: &str) {
        let navigation = routing::resolve(path, self.session.is_authenticated());
        self.follow(navigation);
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        let navigation = routing::guard(route, self.session.is_authenticated());
        self.follow(navigation);
    }

    fn follow(&mut self, navigation: Navigation) {
        if let Navigation::Redirect(target) = &navigation {
            info!("redirecting to {target}");
        }
        self.enter(navigation.into_target());
    }

    /// Replaces the current view with a fresh instance of `route` and starts
    /// its initial fetch. Anything still in flight for the old view is now
    /// stale.
    fn enter(&mut self, route: Route) {
        let token = ViewToken::next();
        info!("entering {route}");
        self.view = match route {
            Route::Posts => {
                let mut state = PostListState::new(token);
                state.posts.begin();
                tasks::load_posts(self.api.clone(), self.outbox.clone(), token);
                ViewState::Posts(state)
            }
            Route::Login => ViewState::Login(LoginState::new(token)),
            Route::Register => ViewState::Register(RegisterState::new(token)),
            Route::Create => ViewState::Create(PostFormState::new(token)),
            Route::Dashboard => {
                let Some(user_id) = self.session.user_id().map(str::to_string) else {
                    return self.enter(Route::Login);
                };
                let mut state = DashboardState::new(token, user_id.clone());
                state.data.begin();
                tasks::load_dashboard(self.api.clone(), self.outbox.clone(), token, user_id);
                ViewState::Dashboard(state)
            }
            Route::UpdatePost(post_id) => {
                let mut state = UpdatePostState::new(token, post_id.clone());
                state.loaded.begin();
                tasks::load_post(self.api.clone(), self.outbox.clone(), token, post_id);
                ViewState::UpdatePost(state)
            }
            Route::UpdateUser(user_id) => {
                let mut state = UpdateUserState::new(token, user_id.clone());
                state.loaded.begin();
                tasks::load_user(self.api.clone(), self.outbox.clone(), token, user_id);
                ViewState::UpdateUser(state)
            }
        };
    }

    fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            warn!("failed to clear persisted session: {err:#}");
            self.toasts.error("Logged out, but the saved session could not be cleared");
        }
        self.navigate(Route::Posts);
    }

    fn apply_base_url(&mut self) {
        match self.api.set_base_url(self.base_url_input.clone()) {
            Ok(()) => {
                self.base_url_input = self.api.base_url().to_string();
                self.toasts.success("API URL updated");
                if let Some(route) = self.current_route() {
                    self.navigate(route);
                }
            }
            Err(err) => self.toasts.error(format!("Failed to update URL: {err}")),
        }
    }

    fn apply_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::None => {}
            ViewAction::Navigate(route) => self.navigate(route),
            ViewAction::Reload => {
                if let Some(route) = self.current_route() {
                    self.navigate(route);
                }
            }
            ViewAction::Like(post_id) => self.spawn_like(post_id),
            ViewAction::Delete(post_id) => self.spawn_delete(post_id),
            ViewAction::Submit => self.submit_current_form(),
            ViewAction::Logout => self.logout(),
        }
    }

    fn spawn_like(&mut self, post_id: String) {
        let ViewState::Posts(state) = &mut self.view else {
            return;
        };
        if !state.liking.insert(post_id.clone()) {
            return;
        }
        let user_id = self.session.user_id().map(str::to_string);
        tasks::like_post(
            self.api.clone(),
            self.outbox.clone(),
            state.token,
            post_id,
            user_id,
        );
    }

    fn spawn_delete(&mut self, post_id: String) {
        let ViewState::Dashboard(state) = &mut self.view else {
            return;
        };
        if !state.deleting.insert(post_id.clone()) {
            return;
        }
        state.action_error = None;
        tasks::delete_post(
            self.api.clone(),
            self.outbox.clone(),
            state.token,
            state.user_id.clone(),
            post_id,
        );
    }

    fn submit_current_form(&mut self) {
        let api = self.api.clone();
        let outbox = self.outbox.clone();
        let session_user = self.session.user_id().map(str::to_string);
        match &mut self.view {
            ViewState::Create(state) => {
                if state.submitting {
                    return;
                }
                if let Err(message) = validation::require("Title", &state.form.title)
                    .and_then(|_| validation::require("Description", &state.form.description))
                {
                    state.error = Some(message);
                    return;
                }
                let Some(user_id) = session_user else {
                    state.error = Some("You need to log in to post".to_string());
                    return;
                };
                let update = state.form.to_update();
                let payload = CreatePostInput {
                    user_id,
                    title: update.title,
                    description: update.description,
                    img: update.img,
                };
                state.submitting = true;
                state.error = None;
                tasks::create_post(api, outbox, state.token, payload);
            }
            ViewState::UpdatePost(state) => {
                if state.submitting || state.loaded.ready().is_none() {
                    return;
                }
                state.submitting = true;
                state.error = None;
                tasks::update_post(
                    api,
                    outbox,
                    state.token,
                    state.post_id.clone(),
                    state.form.to_update(),
                );
            }
            ViewState::UpdateUser(state) => {
                if state.submitting {
                    return;
                }
                if let Err(message) = validation::email(&state.email)
                    .and_then(|_| validation::require("Name", &state.username))
                {
                    state.error = Some(message);
                    return;
                }
                let payload = UpdateUserInput {
                    email: state.email.trim().to_string(),
                    password: state.password.clone(),
                    username: state.username.trim().to_string(),
                };
                state.submitting = true;
                state.error = None;
                tasks::update_user(api, outbox, state.token, state.user_id.clone(), payload);
            }
            ViewState::Login(state) => {
                if state.submitting {
                    return;
                }
                if let Err(message) = validation::email(&state.form.email)
                    .and_then(|_| validation::require("Password", &state.form.password))
                {
                    state.error = Some(message);
                    return;
                }
                let payload = LoginInput {
                    email: state.form.email.trim().to_string(),
                    password: state.form.password.clone(),
                };
                state.submitting = true;
                state.error = None;
                tasks::login(api, outbox, state.token, payload);
            }
            ViewState::Register(state) => {
                if state.submitting {
                    return;
                }
                if let Err(message) = validation::require("Username", &state.username)
                    .and_then(|_| validation::email(&state.email))
                    .and_then(|_| validation::require("Password", &state.password))
                {
                    state.error = Some(message);
                    return;
                }
                let payload = RegisterInput {
                    username: state.username.trim().to_string(),
                    email: state.email.trim().to_string(),
                    password: state.password.clone(),
                };
                state.submitting = true;
                state.error = None;
                tasks::register(api, outbox, state.token, payload);
            }
            ViewState::Blank | ViewState::Posts(_) | ViewState::Dashboard(_) => {}
        }
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn render_view(&mut self, ui: &mut egui::Ui) -> ViewAction {
        let mut view = std::mem::replace(&mut self.view, ViewState::Blank);
        let action = match &mut view {
            ViewState::Blank => ViewAction::None,
            ViewState::Posts(state) => self.render_posts(ui, state),
            ViewState::Login(state) => ui::auth::render_login(ui, state),
            ViewState::Register(state) => ui::auth::render_register(ui, state),
            ViewState::Create(state) => ui::forms::render_create_post(ui, state),
            ViewState::Dashboard(state) => self.render_dashboard(ui, state),
            ViewState::UpdatePost(state) => ui::forms::render_update_post(ui, state),
            ViewState::UpdateUser(state) => ui::forms::render_update_user(ui, state),
        };
        self.view = view;
        action
    }
}

impl eframe::App for BlogboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        let nav_action = self.render_nav(ctx);
        self.apply_action(nav_action);
        self.render_settings(ctx);

        let mut action = ViewAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = self.render_view(ui);
        });
        self.apply_action(action);

        self.toasts.render(ctx);
    }
}

fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests;
