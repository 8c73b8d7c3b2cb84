// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity list page controller.
//!
//! Owns the user's activity collection and the page-level state around it:
//! 1. Fetch and normalize the list on entry
//! 2. Bulk refresh from the upstream tracker, then reload
//! 3. Delegate per-row "generate name" actions to the tracker
//! 4. Render rows most recent first

use crate::error::{ClientError, Result, LIST_LOAD_FAILED, REFRESH_FAILED};
use crate::models::{ActivityCollection, GenerationStatus};
use crate::services::generation::{GenerationTicket, GenerationTracker};
use crate::services::ApiClient;
use crate::store::ActivityStore;
use crate::view::{ActivityRow, PageView};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const REFRESH_LABEL: &str = "Refresh Last 10";
pub const REFRESHING_LABEL: &str = "Refreshing...";

/// Page-level status, independent of the collection contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for PageStatus {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }
}

/// Controller for one user's activity list.
pub struct ActivityListController {
    user_id: u64,
    api: ApiClient,
    store: Arc<ActivityStore>,
    tracker: GenerationTracker,
    page: watch::Sender<PageStatus>,
    refreshing: AtomicBool,
}

/// Clears the refresh busy flag when the refresh finishes, however it ends.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ActivityListController {
    pub fn new(user_id: u64, api: ApiClient, success_display: Duration) -> Self {
        let store = Arc::new(ActivityStore::new());
        let tracker = GenerationTracker::new(api.clone(), store.clone(), success_display);
        let (page, _rx) = watch::channel(PageStatus::default());
        Self {
            user_id,
            api,
            store,
            tracker,
            page,
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn store(&self) -> &Arc<ActivityStore> {
        &self.store
    }

    /// Subscribe to page status changes.
    pub fn subscribe_page(&self) -> watch::Receiver<PageStatus> {
        self.page.subscribe()
    }

    pub fn page_status(&self) -> PageStatus {
        self.page.borrow().clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Fetch the user's activities and replace the collection.
    ///
    /// On failure the collection is left as is and a page-level error is set.
    pub async fn load_activities(&self) -> Result<usize> {
        let user_id = self.user_id;
        self.page.send_modify(|page| page.loading = true);

        match self.api.list_activities(user_id).await {
            Ok(payload) => {
                let collection = ActivityCollection::from_payload(payload);
                let count = collection.len();
                self.store.replace(collection);
                self.page.send_replace(PageStatus {
                    loading: false,
                    error: None,
                });
                tracing::info!(user_id, count, "Activities loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to load activities");
                self.page.send_replace(PageStatus {
                    loading: false,
                    error: Some(LIST_LOAD_FAILED.to_string()),
                });
                Err(e)
            }
        }
    }

    /// Ask the backend to re-sync recent activities, then reload the list.
    ///
    /// The reload only happens if the refresh call succeeds. Rejected with
    /// `ClientError::Busy` while a previous refresh is outstanding.
    pub async fn refresh_recent(&self) -> Result<usize> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::Busy("Refresh"));
        }
        let _guard = RefreshGuard(&self.refreshing);

        let user_id = self.user_id;
        self.page.send_modify(|page| page.error = None);

        if let Err(e) = self.api.refresh_recent(user_id).await {
            tracing::error!(user_id, error = %e, "Failed to refresh recent activities");
            self.page
                .send_modify(|page| page.error = Some(REFRESH_FAILED.to_string()));
            return Err(e);
        }

        tracing::info!(user_id, "Recent activities refreshed upstream");
        self.load_activities().await
    }

    /// Trigger name generation for one row.
    pub fn generate_name(&self, activity_id: u64) -> Result<GenerationTicket> {
        self.tracker.trigger(activity_id)
    }

    pub fn generation_status(&self, activity_id: u64) -> Option<GenerationStatus> {
        self.store.get(activity_id).map(|a| a.generation_status)
    }

    /// Rows in display order (most recent first), recomputed on each call.
    pub fn rows(&self) -> Vec<ActivityRow> {
        self.store
            .snapshot()
            .sorted_by_start_desc()
            .into_iter()
            .map(ActivityRow::from)
            .collect()
    }

    /// What the page shows right now.
    pub fn render(&self) -> PageView {
        let page = self.page_status();
        if page.loading {
            PageView::Loading
        } else if let Some(error) = page.error {
            PageView::Failed(error)
        } else {
            PageView::Ready(self.rows())
        }
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.is_refreshing() {
            REFRESHING_LABEL
        } else {
            REFRESH_LABEL
        }
    }
}
