use std::net::TcpListener;
use std::thread;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blogboard_frontend::api::{ApiClient, ApiError};
use blogboard_frontend::models::{
    CreatePostInput, LoginInput, RegisterInput, UpdatePostInput, UpdateUserInput,
};

fn router() -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post).put(update_post))
        .route("/posts/:id/like", post(like_post))
        .route("/user/:user_id", get(get_user))
        .route("/user/:user_id/posts/:post_id", delete(delete_post))
        .route("/update/:user_id", put(update_user))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/images/pixel.bin", get(image_bytes))
}

fn sample_posts() -> Value {
    json!([
        {
            "postId": "p1",
            "userId": "u1",
            "title": "Hello",
            "description": "First post",
            "username": "ada",
            "date": "2024-03-01T10:00:00Z",
            "likes": "3"
        },
        {
            "_id": "p2",
            "userId": "u2",
            "title": "Second",
            "description": "Another",
            "username": "bob",
            "img": "",
            "likes": 2.9
        },
        {
            "postId": "p3",
            "userId": "u1",
            "title": "Third",
            "username": "ada",
            "likes": -4
        }
    ])
}

async fn list_posts() -> Json<Value> {
    Json(json!({ "results": sample_posts() }))
}

async fn get_post(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "p1" => Json(json!({ "post": sample_posts()[0].clone() })).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Post not found" })),
        )
            .into_response(),
    }
}

async fn create_post(Json(body): Json<Value>) -> Response {
    if body["userId"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "userId is required" })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "post": body }))).into_response()
}

async fn update_post(Path(_id): Path<String>, Json(_body): Json<Value>) -> StatusCode {
    StatusCode::OK
}

async fn like_post(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    match body["userId"].as_str() {
        Some("u1") if id == "p1" => Json(json!({ "likes": 4 })).into_response(),
        Some(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Already liked" })),
        )
            .into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn get_user(Path(user_id): Path<String>) -> Response {
    if user_id == "deleted" {
        return Json(json!({ "user": null, "posts": { "results": [] } })).into_response();
    }
    if user_id != "u1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "User not found" })),
        )
            .into_response();
    }
    let posts = sample_posts();
    Json(json!({
        "user": { "_id": "u1", "username": "ada", "email": "ada@example.com" },
        "posts": { "results": [posts[0].clone(), posts[2].clone()] }
    }))
    .into_response()
}

async fn delete_post(Path((user_id, post_id)): Path<(String, String)>) -> StatusCode {
    if user_id == "u1" && post_id == "p1" {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn update_user(Path(_user_id): Path<String>, Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().contains('@') {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Invalid email" })),
        )
            .into_response()
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({ "user": { "_id": "u1", "username": "ada" } })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "plain" {
        return (StatusCode::CREATED, "created").into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn image_bytes() -> Vec<u8> {
    vec![1, 2, 3, 4]
}

fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("listener address");
    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, router()).await.expect("serve");
        });
    });
    format!("http://{addr}/")
}

fn client() -> ApiClient {
    ApiClient::new(spawn_server()).expect("client")
}

#[test]
fn lists_posts_and_coerces_likes() {
    let posts = client().list_posts().expect("posts");
    let ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    let likes: Vec<u64> = posts.iter().map(|post| post.likes).collect();
    assert_eq!(likes, vec![3, 2, 0]);
    assert_eq!(posts[1].image_url(), None);
}

#[test]
fn missing_post_surfaces_server_message() {
    let api = client();
    assert_eq!(api.get_post("p1").expect("post").title, "Hello");

    let err = api.get_post("nope").expect_err("missing post");
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Post not found");
}

#[test]
fn like_returns_server_count() {
    let api = client();
    assert_eq!(api.like_post("p1", Some("u1")).expect("like"), 4);

    let err = api.like_post("p2", Some("u1")).expect_err("conflict");
    assert_eq!(err.user_message(), "Already liked");

    let err = api.like_post("p1", None).expect_err("anonymous like");
    assert_eq!(err.user_message(), "Request failed with status code 401");
}

#[test]
fn delete_uses_owner_scoped_path() {
    let api = client();
    api.delete_post("u1", "p1").expect("delete");

    let err = api.delete_post("u1", "p2").expect_err("server failure");
    assert!(matches!(
        err,
        ApiError::Application {
            message: None,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[test]
fn user_with_posts_and_not_found() {
    let api = client();
    let reply = api.get_user_with_posts("u1").expect("user");
    let user = reply.user.expect("user present");
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(reply.posts.results.len(), 2);

    let err = api.get_user_with_posts("ghost").expect_err("no user");
    assert!(err.is_not_found());

    let reply = api.get_user_with_posts("deleted").expect("null user decodes");
    assert_eq!(reply.user, None);
}

#[test]
fn create_and_update_requests() {
    let api = client();
    api.create_post(&CreatePostInput {
        user_id: "u1".into(),
        title: "New".into(),
        description: "Body".into(),
        img: String::new(),
    })
    .expect("create");

    let err = api
        .create_post(&CreatePostInput::default())
        .expect_err("missing user");
    assert_eq!(err.user_message(), "userId is required");

    api.update_post(
        "p1",
        &UpdatePostInput {
            title: "Edited".into(),
            description: "Body".into(),
            img: String::new(),
        },
    )
    .expect("update post");

    let err = api
        .update_user(
            "u1",
            &UpdateUserInput {
                email: "not-an-email".into(),
                password: String::new(),
                username: "ada".into(),
            },
        )
        .expect_err("bad email");
    assert_eq!(err.user_message(), "Invalid email");
}

#[test]
fn login_and_register() {
    let api = client();
    let reply = api
        .login(&LoginInput {
            email: "ada@example.com".into(),
            password: "secret".into(),
        })
        .expect("login");
    assert_eq!(reply.resolved_user_id().as_deref(), Some("u1"));

    let err = api
        .login(&LoginInput {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        })
        .expect_err("bad password");
    assert_eq!(err.user_message(), "Invalid credentials");

    let reply = api
        .register(&RegisterInput {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        })
        .expect("register");
    assert_eq!(reply.resolved_user_id(), None);

    let reply = api
        .register(&RegisterInput {
            username: "plain".into(),
            email: "plain@example.com".into(),
            password: "secret".into(),
        })
        .expect("plain-text register reply");
    assert_eq!(reply.resolved_user_id(), None);
}

#[test]
fn downloads_raw_bytes() {
    let base = spawn_server();
    let api = ApiClient::new(base.clone()).expect("client");
    let bytes = api
        .download(&format!("{base}images/pixel.bin"))
        .expect("download");
    assert_eq!(bytes, vec![1, 2, 3, 4]);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let api = ApiClient::new("http://127.0.0.1:9").expect("client");
    let err = api.list_posts().expect_err("connection refused");
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!err.user_message().is_empty());
}
