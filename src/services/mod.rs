// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend calls and page logic.

pub mod activities;
pub mod api;
pub mod auth;
pub mod broadcast;
pub mod generation;

pub use activities::{ActivityListController, PageStatus};
pub use api::ApiClient;
pub use auth::{AuthBridge, AuthError};
pub use broadcast::BroadcastForm;
pub use generation::{GenerationTicket, GenerationTracker};
