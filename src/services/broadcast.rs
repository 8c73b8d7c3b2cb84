// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Broadcast form: send one message to every bot user.

use crate::error::{ClientError, Result};
use crate::services::ApiClient;

pub const BROADCAST_SENT: &str = "Broadcast sent successfully!";

/// Draft and last status of the broadcast form.
pub struct BroadcastForm {
    api: ApiClient,
    draft: String,
    status: Option<String>,
}

impl BroadcastForm {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            draft: String::new(),
            status: None,
        }
    }

    pub fn set_draft(&mut self, message: impl Into<String>) {
        self.draft = message.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Status line from the last submission.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Send the current draft. The draft is cleared only on success.
    pub async fn submit(&mut self) -> Result<()> {
        self.status = None;
        if !self.can_submit() {
            return Err(ClientError::InvalidInput(
                "broadcast message is empty".to_string(),
            ));
        }

        match self.api.send_broadcast(&self.draft).await {
            Ok(()) => {
                tracing::info!(length = self.draft.len(), "Broadcast sent");
                self.status = Some(BROADCAST_SENT.to_string());
                self.draft.clear();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Broadcast failed");
                self.status = Some(match &e {
                    ClientError::Backend { body, .. } => format!("Failed: {}", body),
                    other => other.to_string(),
                });
                Err(e)
            }
        }
    }
}
