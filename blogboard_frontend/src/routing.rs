//! Navigation targets and the session-based route guard.
//!
//! The guard only checks whether a user id is present. It never validates
//! that id against the server, so anyone who can write the session file can
//! act as any user. That is how the service's web client behaves and it is
//! kept as-is here.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Posts,
    Login,
    Register,
    Create,
    Dashboard,
    UpdatePost(String),
    UpdateUser(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up on screen.
    pub fn target(&self) -> &Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }

    pub fn into_target(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

impl Route {
    /// `None` for paths no view answers to.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Posts),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["create"] => Some(Route::Create),
            ["dashboard"] => Some(Route::Dashboard),
            ["update", post_id] => Some(Route::UpdatePost((*post_id).to_string())),
            ["update-user", user_id] => Some(Route::UpdateUser((*user_id).to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Posts => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Create => "/create".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::UpdatePost(post_id) => format!("/update/{post_id}"),
            Route::UpdateUser(user_id) => format!("/update-user/{user_id}"),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Create | Route::Dashboard | Route::UpdatePost(_) | Route::UpdateUser(_)
        )
    }

    /// Login and register make no sense once a session exists.
    pub fn guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub fn guard(route: Route, has_session: bool) -> Navigation {
    if route.requires_session() && !has_session {
        Navigation::Redirect(Route::Login)
    } else if route.guest_only() && has_session {
        Navigation::Redirect(Route::Dashboard)
    } else {
        Navigation::Render(route)
    }
}

/// Resolves a raw path; unknown paths go to the post list.
pub fn resolve(path: &str, has_session: bool) -> Navigation {
    match Route::parse(path) {
        Some(route) => guard(route, has_session),
        None => Navigation::Redirect(Route::Posts),
    }
}
