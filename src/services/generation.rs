// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-activity "generate name" request tracking.
//!
//! Lifecycle of one activity's generation status:
//! 1. `idle`/`success`/`error` -> `pending` immediately on trigger
//! 2. `pending` -> `success` when the backend accepts the request
//! 3. `pending` -> `error` on transport failure or non-2xx
//! 4. `success` -> `idle` once the display window elapses
//!
//! Every trigger gets a fresh attempt number stamped on the record. A
//! completion or timer only applies while the record still carries that
//! attempt and is in the expected source state, so callbacks orphaned by a
//! reload or a newer trigger are no-ops.

use crate::error::{ClientError, Result};
use crate::models::{Activity, GenerationStatus};
use crate::services::ApiClient;
use crate::store::{ActivityStore, Update};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const PENDING_MESSAGE: &str = "Sending request...";
pub const SUCCESS_MESSAGE: &str = "Name generation started!";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to start name generation.";

/// Move a record into `pending` for `attempt`.
///
/// Rejected while a request is already pending for this record.
pub fn begin(activity: &mut Activity, attempt: u64) -> Result<()> {
    if activity.generation_status == GenerationStatus::Pending {
        return Err(ClientError::AlreadyPending(activity.id));
    }
    activity.generation_status = GenerationStatus::Pending;
    activity.generation_message = Some(PENDING_MESSAGE.to_string());
    activity.generation_attempt = attempt;
    Ok(())
}

/// Apply the network outcome of `attempt`. Returns whether anything changed.
pub fn settle(activity: &mut Activity, attempt: u64, outcome: &Result<()>) -> bool {
    if activity.generation_status != GenerationStatus::Pending
        || activity.generation_attempt != attempt
    {
        return false;
    }
    match outcome {
        Ok(()) => {
            activity.generation_status = GenerationStatus::Success;
            activity.generation_message = Some(SUCCESS_MESSAGE.to_string());
        }
        Err(e) => {
            activity.generation_status = GenerationStatus::Error;
            activity.generation_message = Some(e.user_message(FALLBACK_ERROR_MESSAGE));
        }
    }
    true
}

/// Return a still-displayed success of `attempt` to `idle`.
pub fn expire_success(activity: &mut Activity, attempt: u64) -> bool {
    if activity.generation_status != GenerationStatus::Success
        || activity.generation_attempt != attempt
    {
        return false;
    }
    activity.generation_status = GenerationStatus::Idle;
    activity.generation_message = None;
    true
}

/// Handle to an in-flight generation request.
#[derive(Debug)]
pub struct GenerationTicket {
    pub activity_id: u64,
    pub attempt: u64,
    /// Completes after the outcome is applied and, on success, the
    /// display window has elapsed.
    pub handle: JoinHandle<()>,
}

/// Drives generation requests and writes their status into the store.
#[derive(Clone)]
pub struct GenerationTracker {
    api: ApiClient,
    store: Arc<ActivityStore>,
    success_display: Duration,
    attempts: Arc<AtomicU64>,
}

impl GenerationTracker {
    pub fn new(api: ApiClient, store: Arc<ActivityStore>, success_display: Duration) -> Self {
        Self {
            api,
            store,
            success_display,
            attempts: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Trigger name generation for one activity.
    ///
    /// The record is `pending` when this returns; the request itself runs
    /// on a spawned task.
    pub fn trigger(&self, activity_id: u64) -> Result<GenerationTicket> {
        let api = self.api.clone();
        self.dispatch(activity_id, async move { api.trigger_generation(activity_id).await })
    }

    /// Run the optimistic transition, then hand `request` to the runtime.
    pub(crate) fn dispatch<F>(&self, activity_id: u64, request: F) -> Result<GenerationTicket>
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed);

        let mut rejected = None;
        let update = self.store.update(activity_id, |activity| match begin(activity, attempt) {
            Ok(()) => true,
            Err(e) => {
                rejected = Some(e);
                false
            }
        });

        match update {
            Update::Applied => {}
            Update::Missing => return Err(ClientError::UnknownActivity(activity_id)),
            Update::Unchanged => {
                return Err(rejected.unwrap_or(ClientError::AlreadyPending(activity_id)))
            }
        }

        tracing::info!(activity_id, attempt, "Name generation requested");

        let tracker = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = request.await;
            tracker.complete(activity_id, attempt, outcome).await;
        });

        Ok(GenerationTicket {
            activity_id,
            attempt,
            handle,
        })
    }

    async fn complete(&self, activity_id: u64, attempt: u64, outcome: Result<()>) {
        if let Err(e) = &outcome {
            tracing::warn!(activity_id, attempt, error = %e, "Name generation request failed");
        }

        let update = self
            .store
            .update(activity_id, |activity| settle(activity, attempt, &outcome));
        if update != Update::Applied {
            tracing::debug!(activity_id, attempt, ?update, "Generation outcome orphaned");
            return;
        }

        if outcome.is_err() {
            return;
        }

        tokio::time::sleep(self.success_display).await;

        let update = self
            .store
            .update(activity_id, |activity| expire_success(activity, attempt));
        tracing::debug!(activity_id, attempt, ?update, "Success display window elapsed");
    }
}
