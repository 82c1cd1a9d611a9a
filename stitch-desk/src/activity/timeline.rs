//! Activity timeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::OrderActivity;
use std::cmp::Ordering;

use super::narrator::narrate;

pub const SYSTEM_PERFORMER: &str = "System";

/// One narrated row of the order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub activity_type: String,
    pub title: String,
    pub subtitle: String,
    pub performer: String,
    pub performed_at: Option<DateTime<Utc>>,
}

/// Display name of whoever performed the activity
pub fn performer(activity: &OrderActivity) -> &str {
    [
        activity.user_name.as_deref(),
        activity.user_email.as_deref(),
        activity.performed_by.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|name| !name.is_empty())
    .unwrap_or(SYSTEM_PERFORMER)
}

/// Narrate `activities`, newest first. Rows without a timestamp go last.
pub fn timeline(activities: &[OrderActivity]) -> Vec<TimelineEntry> {
    let mut rows: Vec<&OrderActivity> = activities.iter().collect();
    rows.sort_by(|a, b| match (a.performed_at, b.performed_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    rows.into_iter()
        .map(|activity| {
            let narration = narrate(activity);
            TimelineEntry {
                id: activity.id.clone(),
                activity_type: activity.activity_type.clone(),
                title: narration.title,
                subtitle: narration.subtitle,
                performer: performer(activity).to_string(),
                performed_at: activity.performed_at,
            }
        })
        .collect()
}
