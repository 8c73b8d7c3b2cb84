// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use crate::models::TelegramIdentity;
use std::env;
use std::time::Duration;

/// Default backend location (the dev server's API proxy target).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8888";

/// How long a successful generation acknowledgement stays on screen.
pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 3000;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Display window before a `success` status falls back to `idle`
    pub success_display: Duration,
    /// User whose activities the list commands operate on
    pub user_id: Option<u64>,
    /// Identity handed to the login handshake
    pub login_identity: Option<TelegramIdentity>,
}

impl Config {
    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            success_display: Duration::from_millis(DEFAULT_SUCCESS_DISPLAY_MS),
            user_id: None,
            login_identity: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("STRAVACH_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let success_display_ms = match env::var("STRAVACH_SUCCESS_DISPLAY_MS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("STRAVACH_SUCCESS_DISPLAY_MS", v))?,
            Err(_) => DEFAULT_SUCCESS_DISPLAY_MS,
        };

        let user_id = optional_id("STRAVACH_USER_ID")?;

        let login_identity = match optional_id("TG_USER_ID")? {
            Some(id) => Some(TelegramIdentity {
                id,
                first_name: env::var("TG_FIRST_NAME").unwrap_or_default(),
                last_name: env::var("TG_LAST_NAME").ok(),
                username: env::var("TG_USERNAME").ok(),
            }),
            None => None,
        };

        Ok(Self {
            api_url,
            success_display: Duration::from_millis(success_display_ms),
            user_id,
            login_identity,
        })
    }
}

fn optional_id(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
