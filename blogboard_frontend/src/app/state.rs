use std::collections::HashSet;

use crate::aggregate::{aggregate_posts, AggregateRow};
use crate::models::{Post, UpdatePostInput, User};
use crate::resource::{LoadState, ViewToken};
use crate::routing::Route;

pub enum ViewState {
    /// Placeholder while a view is temporarily taken out for rendering.
    Blank,
    Posts(PostListState),
    Login(LoginState),
    Register(RegisterState),
    Create(PostFormState),
    Dashboard(DashboardState),
    UpdatePost(UpdatePostState),
    UpdateUser(UpdateUserState),
}

impl ViewState {
    pub fn token(&self) -> Option<ViewToken> {
        match self {
            ViewState::Blank => None,
            ViewState::Posts(state) => Some(state.token),
            ViewState::Login(state) => Some(state.token),
            ViewState::Register(state) => Some(state.token),
            ViewState::Create(state) => Some(state.token),
            ViewState::Dashboard(state) => Some(state.token),
            ViewState::UpdatePost(state) => Some(state.token),
            ViewState::UpdateUser(state) => Some(state.token),
        }
    }

    pub fn route(&self) -> Option<Route> {
        Some(match self {
            ViewState::Blank => return None,
            ViewState::Posts(_) => Route::Posts,
            ViewState::Login(_) => Route::Login,
            ViewState::Register(_) => Route::Register,
            ViewState::Create(_) => Route::Create,
            ViewState::Dashboard(_) => Route::Dashboard,
            ViewState::UpdatePost(state) => Route::UpdatePost(state.post_id.clone()),
            ViewState::UpdateUser(state) => Route::UpdateUser(state.user_id.clone()),
        })
    }
}

pub struct PostListState {
    pub token: ViewToken,
    pub posts: LoadState<Vec<Post>>,
    pub liking: HashSet<String>,
}

impl PostListState {
    pub fn new(token: ViewToken) -> Self {
        Self {
            token,
            posts: LoadState::Idle,
            liking: HashSet::new(),
        }
    }

    /// Replaces one post's like count with the server's value.
    pub fn apply_like(&mut self, post_id: &str, likes: u64) -> bool {
        let Some(posts) = self.posts.ready_mut() else {
            return false;
        };
        match posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => {
                post.likes = likes;
                true
            }
            None => false,
        }
    }
}

#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub struct LoginState {
    pub token: ViewToken,
    pub form: LoginForm,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new(token: ViewToken) -> Self {
        Self {
            token,
            form: LoginForm::default(),
            submitting: false,
            error: None,
        }
    }
}

pub struct RegisterState {
    pub token: ViewToken,
    pub username: String,
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterState {
    pub fn new(token: ViewToken) -> Self {
        Self {
            token,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Default, Clone, PartialEq, Debug)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    pub img: String,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            img: post.img.clone().unwrap_or_default(),
        }
    }

    pub fn to_update(&self) -> UpdatePostInput {
        UpdatePostInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            img: self.img.trim().to_string(),
        }
    }
}

pub struct PostFormState {
    pub token: ViewToken,
    pub form: PostForm,
    pub submitting: bool,
    pub error: Option<String>,
}

impl PostFormState {
    pub fn new(token: ViewToken) -> Self {
        Self {
            token,
            form: PostForm::default(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub user: User,
    pub posts: Vec<Post>,
    pub rows: Vec<AggregateRow>,
}

impl DashboardData {
    pub fn new(user: User, posts: Vec<Post>) -> Self {
        let rows = aggregate_posts(&posts);
        Self { user, posts, rows }
    }

    pub fn remove_post(&mut self, post_id: &str) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != post_id);
        let removed = self.posts.len() != before;
        if removed {
            self.rows = aggregate_posts(&self.posts);
        }
        removed
    }
}

pub struct DashboardState {
    pub token: ViewToken,
    pub user_id: String,
    pub data: LoadState<DashboardData>,
    pub deleting: HashSet<String>,
    pub action_error: Option<String>,
}

impl DashboardState {
    pub fn new(token: ViewToken, user_id: String) -> Self {
        Self {
            token,
            user_id,
            data: LoadState::Idle,
            deleting: HashSet::new(),
            action_error: None,
        }
    }
}

pub struct UpdatePostState {
    pub token: ViewToken,
    pub post_id: String,
    pub loaded: LoadState<()>,
    pub form: PostForm,
    pub submitting: bool,
    pub error: Option<String>,
}

impl UpdatePostState {
    pub fn new(token: ViewToken, post_id: String) -> Self {
        Self {
            token,
            post_id,
            loaded: LoadState::Idle,
            form: PostForm::default(),
            submitting: false,
            error: None,
        }
    }
}

pub struct UpdateUserState {
    pub token: ViewToken,
    pub user_id: String,
    pub loaded: LoadState<()>,
    pub email: String,
    pub password: String,
    pub username: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl UpdateUserState {
    pub fn new(token: ViewToken, user_id: String) -> Self {
        Self {
            token,
            user_id,
            loaded: LoadState::Idle,
            email: String::new(),
            password: String::new(),
            username: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Clone)]
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(id: &str, user_id: &str, likes: u64) -> Post {
        Post {
            id: id.into(),
            user_id: user_id.into(),
            likes,
            ..Post::default()
        }
    }

    #[test]
    fn removing_a_post_recomputes_rows() {
        let mut data = DashboardData::new(
            User::default(),
            vec![post("p1", "u1", 3), post("p2", "u1", 9)],
        );
        assert_eq!(data.rows[0].max_likes, 9);
        assert!(data.remove_post("p2"));
        assert_eq!(data.rows[0].post_count, 1);
        assert_eq!(data.rows[0].max_likes, 3);
        assert!(!data.remove_post("missing"));
    }

    #[test]
    fn removing_last_post_empties_rows() {
        let mut data = DashboardData::new(User::default(), vec![post("p1", "u1", 3)]);
        data.remove_post("p1");
        assert!(data.rows.is_empty());
    }

    #[test]
    fn like_on_unloaded_list_is_ignored() {
        let mut state = PostListState::new(ViewToken::next());
        assert!(!state.apply_like("p1", 4));
    }

    #[test]
    fn post_form_prefills_from_post() {
        let mut source = post("p1", "u1", 0);
        source.title = "Title".into();
        source.img = None;
        let form = PostForm::from_post(&source);
        assert_eq!(form.title, "Title");
        assert_eq!(form.img, "");
    }

    #[test]
    fn view_route_matches_variant() {
        let view = ViewState::UpdatePost(UpdatePostState::new(ViewToken::next(), "p9".into()));
        assert_eq!(view.route(), Some(Route::UpdatePost("p9".into())));
        assert_eq!(ViewState::Blank.token(), None);
    }
}
