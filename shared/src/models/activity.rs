//! Order Activity Model

use crate::util::{json_or_string, lenient_datetime, lenient_opt_string, lenient_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the order activity view (append-only, written by backend triggers)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderActivity {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub activity_type: String,
    #[serde(default)]
    pub activity_description: Option<String>,
    #[serde(default, deserialize_with = "json_or_string")]
    pub old_values: Option<Value>,
    #[serde(default, deserialize_with = "json_or_string")]
    pub new_values: Option<Value>,
    #[serde(default, deserialize_with = "json_or_string")]
    pub metadata: Option<Value>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl OrderActivity {
    pub fn old_str(&self, key: &str) -> Option<&str> {
        field_str(self.old_values.as_ref(), key)
    }

    pub fn new_str(&self, key: &str) -> Option<&str> {
        field_str(self.new_values.as_ref(), key)
    }

    /// Description with surrounding whitespace removed; `None` when blank
    pub fn description(&self) -> Option<&str> {
        self.activity_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

fn field_str<'a>(values: Option<&'a Value>, key: &str) -> Option<&'a str> {
    values?
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
