// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display models for the activity list.

use crate::models::{Activity, GenerationStatus};
use crate::time_utils::format_display;

pub const GENERATE_LABEL: &str = "Generate Name";
pub const GENERATING_LABEL: &str = "Generating...";

/// What the activity page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    /// Blocking page-level error in place of content
    Failed(String),
    Ready(Vec<ActivityRow>),
}

/// Colour hint for a row's generation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Neutral,
    Success,
    Error,
}

/// One rendered activity card.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub id: u64,
    pub name: String,
    pub activity_type: String,
    pub date: String,
    pub distance: String,
    pub heart_rate: Option<String>,
    pub speed: Option<String>,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub message: Option<String>,
    pub tone: MessageTone,
}

/// `5200.0` -> `"5.20 km"`
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Meters per second -> `"10.80 km/h"`
pub fn format_speed(mps: f64) -> String {
    format!("{:.2} km/h", mps * 3.6)
}

pub fn format_heart_rate(bpm: f64) -> String {
    format!("{} bpm", bpm)
}

// Zero telemetry is treated as missing.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        let pending = activity.generation_status == GenerationStatus::Pending;
        let tone = match activity.generation_status {
            GenerationStatus::Error => MessageTone::Error,
            GenerationStatus::Success => MessageTone::Success,
            _ => MessageTone::Neutral,
        };

        Self {
            id: activity.id,
            name: activity.name.clone(),
            activity_type: activity.activity_type.clone(),
            date: activity
                .start_time
                .map(format_display)
                .unwrap_or_else(|| "-".to_string()),
            distance: format_distance(activity.distance_meters),
            heart_rate: present(activity.average_heart_rate).map(format_heart_rate),
            speed: present(activity.average_speed_mps).map(format_speed),
            button_label: if pending {
                GENERATING_LABEL
            } else {
                GENERATE_LABEL
            },
            button_enabled: !pending,
            message: activity.generation_message.clone(),
            tone,
        }
    }
}
