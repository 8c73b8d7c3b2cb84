// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stravach client: activity list, AI name generation and login handshake
//! for the Strava activity renamer bot's backend.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;
pub mod view;

use config::Config;
use error::Result;
use services::{ActivityListController, ApiClient, AuthBridge, BroadcastForm};

/// Shared client state: configuration plus one session-carrying API client.
pub struct App {
    pub config: Config,
    pub api: ApiClient,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_url)?;
        Ok(Self { config, api })
    }

    pub fn auth_bridge(&self) -> AuthBridge {
        AuthBridge::new(self.api.clone())
    }

    /// Fresh activity page for `user_id`; starts empty and loading.
    pub fn activities_page(&self, user_id: u64) -> ActivityListController {
        ActivityListController::new(user_id, self.api.clone(), self.config.success_display)
    }

    pub fn broadcast_form(&self) -> BroadcastForm {
        BroadcastForm::new(self.api.clone())
    }
}
