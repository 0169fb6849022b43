use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "UserWire")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Backends disagree on the id key and some send several at once, so each
/// spelling gets its own slot and `id` wins.
#[derive(Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire
                .id
                .or(wire.user_id)
                .or(wire.mongo_id)
                .unwrap_or_default(),
            username: wire.username,
            email: wire.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "PostWire")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub username: String,
    pub date: Option<String>,
    pub likes: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    post_id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    img: Option<String>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_likes")]
    likes: u64,
}

impl From<PostWire> for Post {
    fn from(wire: PostWire) -> Self {
        Self {
            id: wire
                .id
                .or(wire.post_id)
                .or(wire.mongo_id)
                .unwrap_or_default(),
            user_id: wire.user_id,
            title: wire.title,
            description: wire.description,
            img: wire.img,
            username: wire.username,
            date: wire.date,
            likes: wire.likes,
        }
    }
}

impl Post {
    /// Image reference, ignoring the empty string the create form submits.
    pub fn image_url(&self) -> Option<&str> {
        self.img
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PostsResponse {
    #[serde(default)]
    pub results: Vec<Post>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserWithPosts {
    /// `null` when the id matches no user.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub posts: PostsResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    #[serde(default, deserialize_with = "deserialize_likes")]
    pub likes: u64,
}

/// Login replies vary between backends; the user id may sit at the top level
/// or inside a nested `user` object.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, alias = "id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    pub fn resolved_user_id(&self) -> Option<String> {
        self.user_id
            .clone()
            .or_else(|| self.user.as_ref().map(|user| user.id.clone()))
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub img: String,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdatePostInput {
    pub title: String,
    pub description: String,
    pub img: String,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LikeInput {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct UpdateUserInput {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Single coercion rule for like counts, applied when JSON is ingested.
///
/// Non-negative integers pass through, floats are truncated, numeric strings
/// are parsed the same way, and anything else (null, negatives, NaN, text,
/// arrays, objects) becomes 0.
pub fn coerce_likes(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().map(truncate_non_negative))
            .unwrap_or(0),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse::<u64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().map(truncate_non_negative))
                .unwrap_or(0)
        }
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

fn truncate_non_negative(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

fn deserialize_likes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_likes(&value))
}
