// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend API client.
//!
//! Handles:
//! - Session establishment from a login-widget identity
//! - Activity listing
//! - Name generation and bulk refresh triggers
//! - Broadcast messages
//!
//! All calls share one cookie store, so the session cookie set by
//! `/tg-auth` is sent on every following request.

use crate::error::{ClientError, Result};
use crate::models::SessionRequest;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with its own cookie store.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Transport(format!("HTTP client init failed: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange a widget identity for a server session.
    ///
    /// POST /tg-auth
    pub async fn establish_session(&self, request: &SessionRequest) -> Result<String> {
        let url = format!("{}/tg-auth", self.base_url);
        let response = self.http.post(&url).json(request).send().await?;
        let response = check_response(response).await?;
        Ok(response.text().await?)
    }

    /// Fetch the raw activity list for a user.
    ///
    /// GET /api/activities/{user_id}
    pub async fn list_activities(&self, user_id: u64) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/api/activities/{}", self.base_url, user_id);
        let response = self.http.get(&url).send().await?;
        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
    }

    /// Ask the backend to start generating a name for one activity.
    ///
    /// POST /api/activity/{activity_id}
    ///
    /// Success means the request was accepted, not that a name exists yet.
    pub async fn trigger_generation(&self, activity_id: u64) -> Result<()> {
        let url = format!("{}/api/activity/{}", self.base_url, activity_id);
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    /// Re-sync the user's most recent activities from the upstream tracker.
    ///
    /// POST /api/activities-refresh-last-10/{user_id}
    pub async fn refresh_recent(&self, user_id: u64) -> Result<()> {
        let url = format!(
            "{}/api/activities-refresh-last-10/{}",
            self.base_url, user_id
        );
        let response = self.http.post(&url).send().await?;
        check_response(response).await?;
        Ok(())
    }

    /// Send a broadcast message to all bot users.
    ///
    /// POST /api/broadcast
    pub async fn send_broadcast(&self, message: &str) -> Result<()> {
        #[derive(Serialize)]
        struct BroadcastRequest<'a> {
            message: &'a str,
        }

        let url = format!("{}/api/broadcast", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&BroadcastRequest { message })
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }
}

/// Check response status and turn non-2xx into `ClientError::Backend`.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status, body = %body, "Backend returned error status");

    Err(ClientError::Backend { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:8888/");
        assert_eq!(client.base_url(), "http://localhost:8888");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}", addr)).unwrap();
        let err = client.refresh_recent(1).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    }
}
