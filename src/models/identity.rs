// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Third-party identity delivered by the login widget.

use serde::{Deserialize, Serialize};

/// Identity passed to the login widget's callback.
///
/// The widget also sends fields such as `auth_date` and `hash`; they are
/// ignored here and never forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramIdentity {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Body of `POST /tg-auth`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest {
    pub user: TelegramIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_extras_are_dropped() {
        let identity: TelegramIdentity = serde_json::from_value(json!({
            "id": 1,
            "first_name": "Dev",
            "last_name": "User",
            "username": "devuser",
            "photo_url": "https://t.me/i/userpic.jpg",
            "auth_date": 1716537600,
            "hash": "abc"
        }))
        .unwrap();

        let body = serde_json::to_value(SessionRequest { user: identity }).unwrap();
        assert_eq!(
            body,
            json!({"user": {"id": 1, "first_name": "Dev", "last_name": "User", "username": "devuser"}})
        );
    }

    #[test]
    fn test_absent_optional_names_are_omitted() {
        let identity = TelegramIdentity {
            id: 2,
            first_name: "Solo".to_string(),
            last_name: None,
            username: None,
        };
        let body = serde_json::to_value(SessionRequest { user: identity }).unwrap();
        assert_eq!(body, json!({"user": {"id": 2, "first_name": "Solo"}}));
    }
}
