// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the client.

pub mod activity;
pub mod identity;

pub use activity::{normalize, Activity, ActivityCollection, GenerationStatus, RawActivity};
pub use identity::{SessionRequest, TelegramIdentity};
