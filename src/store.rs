// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity store shared by the list page and the generation tracker.
//!
//! The collection lives in a `watch` channel. Writers never hold a snapshot
//! across an await: every mutation is applied to the current value under
//! the channel lock, so updates to different activities cannot clobber
//! each other. Renderers subscribe to be told when anything changed.

use crate::models::{Activity, ActivityCollection};
use tokio::sync::watch;

/// Result of a targeted single-record update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The record existed and was changed.
    Applied,
    /// The record existed but the update declined to change it.
    Unchanged,
    /// No record with that ID; nothing was touched or created.
    Missing,
}

/// Activity collection with change notification.
pub struct ActivityStore {
    tx: watch::Sender<ActivityCollection>,
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ActivityCollection::default());
        Self { tx }
    }

    /// Subscribe to collection changes.
    pub fn subscribe(&self) -> watch::Receiver<ActivityCollection> {
        self.tx.subscribe()
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> ActivityCollection {
        self.tx.borrow().clone()
    }

    /// Copy of one record, if present.
    pub fn get(&self, id: u64) -> Option<Activity> {
        self.tx.borrow().get(id).cloned()
    }

    /// Replace the whole collection.
    pub fn replace(&self, collection: ActivityCollection) {
        self.tx.send_replace(collection);
    }

    /// Apply `f` to the record with `id` only.
    ///
    /// `f` returns whether it changed the record. Subscribers are notified
    /// only for `Update::Applied`.
    pub fn update<F>(&self, id: u64, f: F) -> Update
    where
        F: FnOnce(&mut Activity) -> bool,
    {
        let mut outcome = Update::Missing;
        self.tx.send_if_modified(|collection| match collection.get_mut(id) {
            Some(activity) => {
                let changed = f(activity);
                outcome = if changed {
                    Update::Applied
                } else {
                    Update::Unchanged
                };
                changed
            }
            None => false,
        });
        outcome
    }
}
