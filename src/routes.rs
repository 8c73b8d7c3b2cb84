// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side page routes.

use std::fmt;

/// Pages the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page with the login widget
    Home,
    /// Post-login landing page for a user
    User(u64),
    /// Activity list for a user
    Activities(u64),
    Broadcast,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::User(id) => format!("/user/{}", id),
            Route::Activities(id) => format!("/activities/{}", id),
            Route::Broadcast => "/broadcast".to_string(),
        }
    }

    /// Parse a path; unknown paths and non-numeric IDs yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["broadcast"] => Some(Route::Broadcast),
            ["user", id] => id.parse().ok().map(Route::User),
            ["activities", id] => id.parse().ok().map(Route::Activities),
            _ => None,
        }
    }

    /// User whose data the route shows, if any.
    pub fn user_id(&self) -> Option<u64> {
        match self {
            Route::User(id) | Route::Activities(id) => Some(*id),
            Route::Home | Route::Broadcast => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
