use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    AuthResponse, CreatePostInput, ErrorBody, LikeInput, LikeResponse, LoginInput, Post,
    PostResponse, PostsResponse, RegisterInput, UpdatePostInput, UpdateUserInput, UserWithPosts,
};

/// Shown when neither the server nor the transport produced anything readable.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status {status}")]
    Application {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// 2xx reply whose payload names nothing, e.g. `"user": null`.
    #[error("{0} not found")]
    Missing(&'static str),
}

impl ApiError {
    /// Human-readable text for the UI: the server's `message` first, then
    /// the transport or status description, then a fixed default.
    pub fn user_message(&self) -> String {
        let candidate = match self {
            ApiError::Application {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.trim().to_string(),
            ApiError::Application { status, .. } => {
                format!("Request failed with status code {}", status.as_u16())
            }
            ApiError::Transport(err) => err.to_string(),
            ApiError::InvalidUrl(_) | ApiError::Decode(_) | ApiError::Missing(_) => {
                self.to_string()
            }
        };
        if candidate.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            candidate
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Application {
                status: StatusCode::NOT_FOUND,
                ..
            } | ApiError::Missing(_)
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base = sanitize_base_url(base_url.into())?;
        // No request timeout: a hung call only stalls the view that issued it.
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> ApiResult<()> {
        self.base_url = sanitize_base_url(base_url.into())?;
        Ok(())
    }

    pub fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.url("/posts")?;
        let wrapper: PostsResponse = read_json(self.client.get(url))?;
        Ok(wrapper.results)
    }

    pub fn get_post(&self, post_id: &str) -> ApiResult<Post> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        let wrapper: PostResponse = read_json(self.client.get(url))?;
        Ok(wrapper.post)
    }

    pub fn create_post(&self, input: &CreatePostInput) -> ApiResult<()> {
        let url = self.url("/posts")?;
        expect_success(self.client.post(url).json(input))
    }

    pub fn update_post(&self, post_id: &str, input: &UpdatePostInput) -> ApiResult<()> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        expect_success(self.client.put(url).json(input))
    }

    pub fn delete_post(&self, user_id: &str, post_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/user/{user_id}/posts/{post_id}"))?;
        expect_success(self.client.delete(url))
    }

    /// Returns the like count the server settled on.
    pub fn like_post(&self, post_id: &str, user_id: Option<&str>) -> ApiResult<u64> {
        let url = self.url(&format!("/posts/{post_id}/like"))?;
        let payload = LikeInput {
            user_id: user_id.map(str::to_string),
        };
        let response: LikeResponse = read_json(self.client.post(url).json(&payload))?;
        Ok(response.likes)
    }

    pub fn get_user_with_posts(&self, user_id: &str) -> ApiResult<UserWithPosts> {
        let url = self.url(&format!("/user/{user_id}"))?;
        read_json(self.client.get(url))
    }

    pub fn update_user(&self, user_id: &str, input: &UpdateUserInput) -> ApiResult<()> {
        let url = self.url(&format!("/update/{user_id}"))?;
        expect_success(self.client.put(url).json(input))
    }

    pub fn login(&self, input: &LoginInput) -> ApiResult<AuthResponse> {
        let url = self.url("/login")?;
        read_json(self.client.post(url).json(input))
    }

    /// Registration replies are not required to carry a body.
    pub fn register(&self, input: &RegisterInput) -> ApiResult<AuthResponse> {
        let url = self.url("/register")?;
        let response = checked(self.client.post(url).json(input))?;
        let bytes = response.bytes()?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AuthResponse::default());
        }
        match serde_json::from_slice(&bytes) {
            Ok(reply) => Ok(reply),
            Err(err) => {
                debug!("ignoring unreadable register reply: {err}");
                Ok(AuthResponse::default())
            }
        }
    }

    /// Raw GET of an absolute URL, used for post images.
    pub fn download(&self, url: &str) -> ApiResult<Vec<u8>> {
        let url = Url::parse(url).map_err(|err| ApiError::InvalidUrl(format!("{url}: {err}")))?;
        let response = checked(self.client.get(url))?;
        Ok(response.bytes()?.to_vec())
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|err| ApiError::InvalidUrl(format!("{joined}: {err}")))
    }
}

/// Sends the request and turns non-2xx replies into `ApiError::Application`,
/// keeping the `{ message }` body when the server sent one.
fn checked(request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send()?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.message);
    Err(ApiError::Application { status, message })
}

fn expect_success(request: RequestBuilder) -> ApiResult<()> {
    checked(request).map(|_| ())
}

fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = checked(request)?;
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

pub fn sanitize_base_url(mut base: String) -> ApiResult<String> {
    base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    Url::parse(&base).map_err(|err| ApiError::InvalidUrl(format!("{base}: {err}")))?;
    Ok(base)
}
