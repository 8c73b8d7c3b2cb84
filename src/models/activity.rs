// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity records: the raw backend payload and the canonical in-memory form.

use crate::time_utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Activity as returned by `GET /api/activities/{user_id}`.
///
/// Older backend rows use `activity_type` and `date`; newer ones use `type`
/// and `start_date`. Optional fields with an unexpected JSON type are read
/// as absent rather than failing the record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_heartrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_speed: Option<f64>,
    /// Moving time in seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub moving_time: Option<i64>,
    /// Elapsed time in seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub elapsed_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_updated: Option<bool>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))))
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// Client-side state of a "generate name" request for one activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Pending => "pending",
            GenerationStatus::Success => "success",
            GenerationStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical activity record held by the list page.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    /// Backend activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Start date/time; sole sort key
    pub start_time: Option<DateTime<Utc>>,
    /// Distance in meters
    pub distance_meters: f64,
    /// Sport type (Ride, Run, Hike, etc.)
    pub activity_type: String,
    pub average_heart_rate: Option<f64>,
    pub average_speed_mps: Option<f64>,
    pub moving_time_secs: Option<i64>,
    pub elapsed_time_secs: Option<i64>,
    /// Whether the backend already replaced the name
    pub is_updated: bool,
    pub generation_status: GenerationStatus,
    pub generation_message: Option<String>,
    /// Trigger that owns the current non-idle status; 0 when idle after a fetch.
    pub generation_attempt: u64,
}

/// First non-empty string among the candidates.
fn first_present(candidates: [Option<String>; 2]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

impl From<RawActivity> for Activity {
    fn from(raw: RawActivity) -> Self {
        let start_time =
            first_present([raw.start_date, raw.date]).and_then(|s| parse_timestamp(&s));

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            start_time,
            distance_meters: raw.distance.unwrap_or_default().max(0.0),
            activity_type: first_present([raw.kind, raw.activity_type]).unwrap_or_default(),
            average_heart_rate: raw.average_heartrate,
            average_speed_mps: raw.average_speed,
            moving_time_secs: raw.moving_time,
            elapsed_time_secs: raw.elapsed_time,
            is_updated: raw.is_updated.unwrap_or(false),
            generation_status: GenerationStatus::Idle,
            generation_message: None,
            generation_attempt: 0,
        }
    }
}

/// Normalize one raw backend record.
pub fn normalize(raw: RawActivity) -> Activity {
    Activity::from(raw)
}

/// The page's activity collection, keyed by activity ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityCollection {
    by_id: BTreeMap<u64, Activity>,
}

impl ActivityCollection {
    /// Build a collection from a list payload.
    ///
    /// Elements without a usable `id` are skipped. A repeated `id`
    /// overwrites the earlier record.
    pub fn from_payload(payload: Vec<serde_json::Value>) -> Self {
        let mut collection = Self::default();
        for value in payload {
            match serde_json::from_value::<RawActivity>(value) {
                Ok(raw) => collection.insert(normalize(raw)),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping activity record without a valid id");
                }
            }
        }
        collection
    }

    pub fn insert(&mut self, activity: Activity) {
        self.by_id.insert(activity.id, activity);
    }

    pub fn get(&self, id: u64) -> Option<&Activity> {
        self.by_id.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Activity> {
        self.by_id.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.by_id.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.by_id.values()
    }

    /// Activities ordered most recent first. Undated records sort last.
    pub fn sorted_by_start_desc(&self) -> Vec<&Activity> {
        let mut sorted: Vec<&Activity> = self.by_id.values().collect();
        sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        sorted
    }
}

impl FromIterator<Activity> for ActivityCollection {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        let mut collection = Self::default();
        for activity in iter {
            collection.insert(activity);
        }
        collection
    }
}
