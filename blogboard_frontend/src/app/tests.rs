use pretty_assertions::assert_eq;
use reqwest::StatusCode;

use crate::api::ApiError;
use crate::config::FrontendConfig;
use crate::models::{AuthResponse, Post, PostsResponse, User, UserWithPosts};
use crate::resource::{LoadState, ViewToken};
use crate::routing::Route;
use crate::session::{MemorySessionStore, Session};

use super::messages::AppMessage;
use super::state::{
    DashboardData, DashboardState, LoginState, PostFormState, PostListState, ViewState,
};
use super::{BlogboardApp, ViewAction};

// Port 9 (discard) refuses connections, so any request that does get
// spawned fails fast instead of reaching a real server.
fn app_with(user_id: Option<&str>) -> BlogboardApp {
    let store = match user_id {
        Some(id) => MemorySessionStore::with_user(id),
        None => MemorySessionStore::default(),
    };
    let config = FrontendConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..FrontendConfig::default()
    };
    BlogboardApp::with_parts(&config, Session::restore(Box::new(store)), None)
        .expect("app builds")
}

fn post(id: &str, user_id: &str, username: &str, likes: u64) -> Post {
    Post {
        id: id.into(),
        user_id: user_id.into(),
        username: username.into(),
        title: format!("title {id}"),
        likes,
        ..Post::default()
    }
}

fn status_error(status: StatusCode, message: Option<&str>) -> ApiError {
    ApiError::Application {
        status,
        message: message.map(str::to_string),
    }
}

fn posts_view(app: &mut BlogboardApp, posts: Vec<Post>) -> ViewToken {
    let token = ViewToken::next();
    let mut state = PostListState::new(token);
    state.posts = LoadState::Ready(posts);
    app.view = ViewState::Posts(state);
    token
}

fn dashboard_view(app: &mut BlogboardApp, posts: Vec<Post>) -> ViewToken {
    let token = ViewToken::next();
    let mut state = DashboardState::new(token, "u1".into());
    let user = User {
        id: "u1".into(),
        username: "ada".into(),
        email: "ada@example.com".into(),
    };
    state.data = LoadState::Ready(DashboardData::new(user, posts));
    app.view = ViewState::Dashboard(state);
    token
}

#[test]
fn like_reply_updates_only_the_liked_post() {
    let mut app = app_with(Some("u1"));
    let token = posts_view(
        &mut app,
        vec![post("p1", "u1", "ada", 3), post("p2", "u2", "bob", 7)],
    );
    if let ViewState::Posts(state) = &mut app.view {
        state.liking.insert("p1".into());
    }

    app.outbox.send(AppMessage::PostLiked {
        token,
        post_id: "p1".into(),
        result: Ok(4),
    });
    app.process_messages();

    let ViewState::Posts(state) = &app.view else {
        panic!("expected the post list");
    };
    let posts = state.posts.ready().expect("posts stay loaded");
    assert_eq!(posts[0].likes, 4);
    assert_eq!(posts[1].likes, 7);
    assert!(state.liking.is_empty());
}

#[test]
fn failed_like_leaves_counts_alone() {
    let mut app = app_with(Some("u1"));
    let token = posts_view(&mut app, vec![post("p1", "u1", "ada", 3)]);

    app.outbox.send(AppMessage::PostLiked {
        token,
        post_id: "p1".into(),
        result: Err(status_error(StatusCode::INTERNAL_SERVER_ERROR, None)),
    });
    app.process_messages();

    let ViewState::Posts(state) = &app.view else {
        panic!("expected the post list");
    };
    assert_eq!(state.posts.ready().map(|posts| posts[0].likes), Some(3));
    assert_eq!(app.toasts.items().len(), 1);
}

#[test]
fn stale_responses_are_dropped() {
    let mut app = app_with(None);
    let current = ViewToken::next();
    let mut state = PostListState::new(current);
    state.posts.begin();
    app.view = ViewState::Posts(state);

    let old = ViewToken::next();
    app.outbox.send(AppMessage::PostsLoaded {
        token: old,
        result: Ok(vec![post("p1", "u1", "ada", 1)]),
    });
    app.outbox.send(AppMessage::PostsLoaded {
        token: old,
        result: Err(status_error(StatusCode::BAD_GATEWAY, None)),
    });
    app.process_messages();

    let ViewState::Posts(state) = &app.view else {
        panic!("expected the post list");
    };
    assert!(state.posts.is_loading());
    assert!(app.toasts.items().is_empty());
}

#[test]
fn response_for_a_replaced_view_of_the_same_route_is_dropped() {
    let mut app = app_with(Some("u1"));
    let first = dashboard_view(&mut app, vec![post("p1", "u1", "ada", 1)]);
    dashboard_view(&mut app, vec![post("p1", "u1", "ada", 1)]);

    app.outbox.send(AppMessage::PostDeleted {
        token: first,
        post_id: "p1".into(),
        result: Ok(()),
    });
    app.process_messages();

    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    assert_eq!(state.data.ready().map(|data| data.posts.len()), Some(1));
}

#[test]
fn delete_request_marks_post_pending() {
    let mut app = app_with(Some("u1"));
    dashboard_view(&mut app, vec![post("p1", "u1", "ada", 2)]);

    app.apply_action(ViewAction::Delete("p1".into()));

    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    assert!(state.deleting.contains("p1"));
    assert_eq!(state.data.ready().map(|data| data.posts.len()), Some(1));
}

#[test]
fn delete_removes_post_only_after_success() {
    let mut app = app_with(Some("u1"));
    let token = dashboard_view(
        &mut app,
        vec![post("p1", "u1", "ada", 2), post("p2", "u1", "ada", 5)],
    );
    if let ViewState::Dashboard(state) = &mut app.view {
        state.deleting.insert("p1".into());
    }

    app.outbox.send(AppMessage::PostDeleted {
        token,
        post_id: "p1".into(),
        result: Err(status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("database unavailable"),
        )),
    });
    app.process_messages();
    {
        let ViewState::Dashboard(state) = &app.view else {
            panic!("expected the dashboard");
        };
        assert_eq!(state.data.ready().map(|data| data.posts.len()), Some(2));
        assert_eq!(state.action_error.as_deref(), Some("database unavailable"));
        assert!(state.deleting.is_empty());
    }

    app.outbox.send(AppMessage::PostDeleted {
        token,
        post_id: "p1".into(),
        result: Ok(()),
    });
    app.process_messages();
    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    let data = state.data.ready().expect("dashboard stays loaded");
    assert_eq!(data.posts.len(), 1);
    assert_eq!(data.posts[0].id, "p2");
    assert_eq!(data.rows[0].post_count, 1);
    assert_eq!(data.rows[0].max_likes, 5);
    assert_eq!(state.action_error, None);
}

#[test]
fn dashboard_not_found_has_its_own_message() {
    let mut app = app_with(Some("ghost"));
    let token = ViewToken::next();
    let mut state = DashboardState::new(token, "ghost".into());
    state.data.begin();
    app.view = ViewState::Dashboard(state);

    app.outbox.send(AppMessage::DashboardLoaded {
        token,
        result: Err(status_error(StatusCode::NOT_FOUND, Some("no such user"))),
    });
    app.process_messages();

    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    assert_eq!(state.data.error(), Some("User not found!"));
}

#[test]
fn dashboard_reply_without_user_is_not_found() {
    let mut app = app_with(Some("ghost"));
    let token = ViewToken::next();
    let mut state = DashboardState::new(token, "ghost".into());
    state.data.begin();
    app.view = ViewState::Dashboard(state);

    app.outbox.send(AppMessage::DashboardLoaded {
        token,
        result: Ok(UserWithPosts {
            user: None,
            posts: PostsResponse::default(),
        }),
    });
    app.process_messages();

    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    assert_eq!(state.data.error(), Some("User not found!"));
}

#[test]
fn dashboard_load_aggregates_rows() {
    let mut app = app_with(Some("u1"));
    let token = ViewToken::next();
    app.view = ViewState::Dashboard(DashboardState::new(token, "u1".into()));

    app.outbox.send(AppMessage::DashboardLoaded {
        token,
        result: Ok(UserWithPosts {
            user: Some(User {
                id: "u1".into(),
                username: "ada".into(),
                email: "ada@example.com".into(),
            }),
            posts: PostsResponse {
                results: vec![post("p1", "u1", "ada", 3), post("p2", "u1", "ada", 4)],
            },
        }),
    });
    app.process_messages();

    let ViewState::Dashboard(state) = &app.view else {
        panic!("expected the dashboard");
    };
    let data = state.data.ready().expect("dashboard loaded");
    assert_eq!(data.rows.len(), 1);
    assert_eq!(data.rows[0].total_likes, 7);
}

#[test]
fn protected_routes_need_a_session() {
    let mut app = app_with(None);
    app.navigate(Route::Dashboard);
    assert_eq!(app.current_route(), Some(Route::Login));

    app.navigate_path("/update/p1");
    assert_eq!(app.current_route(), Some(Route::Login));
}

#[test]
fn logged_in_users_skip_the_login_view() {
    let mut app = app_with(Some("u1"));
    app.navigate_path("/login");
    assert_eq!(app.current_route(), Some(Route::Dashboard));
}

#[test]
fn create_form_validates_before_sending() {
    let mut app = app_with(Some("u1"));
    app.view = ViewState::Create(PostFormState::new(ViewToken::next()));

    app.apply_action(ViewAction::Submit);

    let ViewState::Create(state) = &app.view else {
        panic!("expected the create form");
    };
    assert!(!state.submitting);
    assert_eq!(state.error.as_deref(), Some("Title is required"));
}

#[test]
fn login_reply_starts_a_session() {
    let mut app = app_with(None);
    let token = ViewToken::next();
    app.view = ViewState::Login(LoginState::new(token));

    app.outbox.send(AppMessage::LoggedIn {
        token,
        result: Ok(AuthResponse {
            user_id: Some("u9".into()),
            user: None,
        }),
    });
    app.process_messages();

    assert_eq!(app.session.user_id(), Some("u9"));
    assert_eq!(app.current_route(), Some(Route::Dashboard));
}

#[test]
fn login_reply_without_id_stays_on_form() {
    let mut app = app_with(None);
    let token = ViewToken::next();
    app.view = ViewState::Login(LoginState::new(token));

    app.outbox.send(AppMessage::LoggedIn {
        token,
        result: Ok(AuthResponse::default()),
    });
    app.process_messages();

    assert!(!app.session.is_authenticated());
    let ViewState::Login(state) = &app.view else {
        panic!("expected the login form");
    };
    assert!(state.error.is_some());
}

#[test]
fn logout_clears_session_and_shows_posts() {
    let mut app = app_with(Some("u1"));
    app.apply_action(ViewAction::Logout);
    assert!(!app.session.is_authenticated());
    assert_eq!(app.current_route(), Some(Route::Posts));
}

#[test]
fn image_results_are_kept_whatever_the_view() {
    let mut app = app_with(None);
    app.image_loading.insert("http://127.0.0.1:9/a.png".into());
    app.outbox.send(AppMessage::ImageLoaded {
        url: "http://127.0.0.1:9/a.png".into(),
        result: Err("Image decode error".into()),
    });
    app.process_messages();

    assert!(app.image_loading.is_empty());
    assert!(app.image_errors.contains_key("http://127.0.0.1:9/a.png"));
}
