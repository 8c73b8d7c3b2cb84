// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login handshake: widget identity -> server session -> user page.

use crate::error::ClientError;
use crate::models::{SessionRequest, TelegramIdentity};
use crate::routes::Route;
use crate::services::ApiClient;

/// Blocking notice shown when the handshake fails.
pub const AUTH_FAILED_NOTICE: &str = "Authentication failed. Please try again.";

/// Failed login handshake. Displays as the user-facing notice.
#[derive(Debug, thiserror::Error)]
#[error("Authentication failed. Please try again.")]
pub struct AuthError(#[source] pub ClientError);

impl AuthError {
    pub fn notice(&self) -> &'static str {
        AUTH_FAILED_NOTICE
    }
}

/// Turns the login widget's callback into a session and a navigation target.
#[derive(Clone)]
pub struct AuthBridge {
    api: ApiClient,
}

impl AuthBridge {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Establish a session for `identity` and return where to navigate.
    ///
    /// Takes the identity by value: one widget callback, one attempt. There
    /// is no retry; on failure the caller must stay on the current page.
    pub async fn complete_login(&self, identity: TelegramIdentity) -> Result<Route, AuthError> {
        let user_id = identity.id;
        let request = SessionRequest { user: identity };

        match self.api.establish_session(&request).await {
            Ok(body) => {
                tracing::info!(user_id, response = %body, "Authentication successful");
                Ok(Route::User(user_id))
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Authentication failed");
                Err(AuthError(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_displays_notice() {
        let err = AuthError(ClientError::Backend {
            status: 401,
            body: "bad hash".to_string(),
        });
        assert_eq!(err.to_string(), AUTH_FAILED_NOTICE);
        assert_eq!(err.notice(), AUTH_FAILED_NOTICE);
        assert_eq!(err.0.status(), Some(401));
    }
}
