//! Order Lifecycle Narrator
//!
//! Turns activity log rows into a title and a one-line sentence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{OrderActivity, OrderStatus};

/// Activity types written for a status transition
const STATUS_TYPES: &[&str] = &["status_changed", "status_change", "order_status_changed"];

pub const STATUS_TITLE: &str = "Status Updated";

/// Activity type → title
const TYPE_TITLES: &[(&str, &str)] = &[
    ("order_created", "Order Created"),
    ("order_updated", "Order Updated"),
    ("payment_received", "Payment Received"),
    ("file_uploaded", "File Uploaded"),
    ("item_added", "Item Added"),
    ("item_updated", "Item Updated"),
    ("item_removed", "Item Removed"),
    ("order_dispatched", "Order Dispatched"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub title: String,
    pub subtitle: String,
}

/// `snake_case` → `Title Case` ("under_qc" → "Under Qc")
pub fn humanize(raw: &str) -> String {
    raw.split(['_', ' ', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_name(status: &OrderStatus) -> String {
    humanize(status.as_str())
}

/// Fixed sentence for a known transition
fn transition_sentence(from: &OrderStatus, to: &OrderStatus) -> Option<&'static str> {
    use OrderStatus::*;

    let sentence = match (from, to) {
        (Pending, Confirmed) => "Order confirmed",
        (Confirmed, DesigningDone) => "Design finalized and approved",
        (Confirmed | DesigningDone, UnderProcurement) => "Material procurement started",
        (UnderProcurement, UnderCutting) => "Material received, cutting started",
        (UnderCutting, UnderStitching) => "Cutting complete, stitching started",
        (UnderStitching, UnderQc) => "Stitching complete, sent for quality check",
        (UnderQc, ReadyForDispatch) => "Quality check passed, ready for dispatch",
        (ReadyForDispatch, PartialDispatched) => "Part of the order dispatched",
        (ReadyForDispatch | PartialDispatched, Dispatched) => "Order dispatched",
        (Rework, UnderQc) => "Rework complete, sent for quality check",
        (Rework, UnderStitching) => "Rework moved back to stitching",
        (from, Rework) if from.is_production() => "Sent back for rework",
        (from, Cancelled) if *from != Cancelled => "Order cancelled",
        _ => return None,
    };
    Some(sentence)
}

/// Sentence for a status transition; `from` is absent for the first status
pub fn status_sentence(from: Option<&OrderStatus>, to: &OrderStatus) -> String {
    match from {
        None => format!("Status set to {}", status_name(to)),
        Some(from) => match transition_sentence(from, to) {
            Some(sentence) => sentence.to_string(),
            None => format!(
                "Status changed from {} to {}",
                status_name(from),
                status_name(to)
            ),
        },
    }
}

fn is_status_type(activity_type: &str) -> bool {
    let activity_type = activity_type.trim();
    STATUS_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(activity_type))
}

fn type_title(activity_type: &str) -> Option<&'static str> {
    let activity_type = activity_type.trim();
    TYPE_TITLES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(activity_type))
        .map(|(_, title)| *title)
}

/// Keys whose value differs between the old and new snapshots, sorted by key
fn changed_fields(activity: &OrderActivity) -> Vec<String> {
    let Some(Value::Object(new)) = &activity.new_values else {
        return Vec::new();
    };
    let old = activity.old_values.as_ref().and_then(Value::as_object);

    let mut keys: Vec<&str> = new
        .iter()
        .filter(|(key, value)| old.and_then(|o| o.get(key.as_str())) != Some(*value))
        .map(|(key, _)| key.as_str())
        .filter(|key| !matches!(*key, "updated_at" | "updated_by"))
        .collect();
    keys.sort_unstable();
    keys.into_iter().map(humanize).collect()
}

fn narrate_status(activity: &OrderActivity) -> Narration {
    let old = activity.old_str("status").map(OrderStatus::parse);
    let new = activity.new_str("status").map(OrderStatus::parse);

    let subtitle = match new {
        Some(new) => status_sentence(old.as_ref(), &new),
        None => activity
            .description()
            .map(str::to_string)
            .unwrap_or_else(|| "Status updated".to_string()),
    };

    Narration {
        title: STATUS_TITLE.to_string(),
        subtitle,
    }
}

/// Narrate one activity row. Never fails; unknown types fall back to the
/// stored description.
pub fn narrate(activity: &OrderActivity) -> Narration {
    let status_moved = match (activity.old_str("status"), activity.new_str("status")) {
        (Some(old), Some(new)) => OrderStatus::parse(old) != OrderStatus::parse(new),
        _ => false,
    };
    if status_moved || is_status_type(&activity.activity_type) {
        return narrate_status(activity);
    }

    let description = activity.description();
    match type_title(&activity.activity_type) {
        Some(title) => {
            let subtitle = match description {
                Some(d) => d.to_string(),
                None => {
                    let fields = changed_fields(activity);
                    if fields.is_empty() {
                        String::new()
                    } else {
                        format!("Changed {}", fields.join(", "))
                    }
                }
            };
            Narration {
                title: title.to_string(),
                subtitle,
            }
        }
        None => Narration {
            title: description
                .map(str::to_string)
                .unwrap_or_else(|| humanize(&activity.activity_type)),
            subtitle: description.unwrap_or_default().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(activity_type: &str, old: Option<Value>, new: Option<Value>) -> OrderActivity {
        OrderActivity {
            id: "a-1".into(),
            order_id: Some("o-1".into()),
            activity_type: activity_type.into(),
            old_values: old,
            new_values: new,
            ..Default::default()
        }
    }

    fn status_change(from: Option<&str>, to: &str) -> OrderActivity {
        activity(
            "status_changed",
            from.map(|f| json!({ "status": f })),
            Some(json!({ "status": to })),
        )
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("under_qc"), "Under Qc");
        assert_eq!(humanize("ready_for_dispatch"), "Ready For Dispatch");
        assert_eq!(humanize("PAYMENT__received"), "Payment Received");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_known_transitions() {
        let n = narrate(&status_change(Some("under_stitching"), "under_qc"));
        assert_eq!(n.title, "Status Updated");
        assert_eq!(n.subtitle, "Stitching complete, sent for quality check");

        let n = narrate(&status_change(Some("under_cutting"), "rework"));
        assert_eq!(n.subtitle, "Sent back for rework");

        let n = narrate(&status_change(Some("Ready For Dispatch"), "dispatched"));
        assert_eq!(n.subtitle, "Order dispatched");

        let n = narrate(&status_change(Some("confirmed"), "cancelled"));
        assert_eq!(n.subtitle, "Order cancelled");
    }

    #[test]
    fn test_unknown_transition_uses_generic_sentence() {
        let n = narrate(&status_change(Some("pending"), "under_qc"));
        assert_eq!(n.subtitle, "Status changed from Pending to Under Qc");

        let n = narrate(&status_change(Some("on_hold"), "confirmed"));
        assert_eq!(n.subtitle, "Status changed from On Hold to Confirmed");

        // Rework is only reachable from a production state
        let n = narrate(&status_change(Some("dispatched"), "rework"));
        assert_eq!(n.subtitle, "Status changed from Dispatched to Rework");
    }

    #[test]
    fn test_first_status() {
        let n = narrate(&status_change(None, "pending"));
        assert_eq!(n.subtitle, "Status set to Pending");
    }

    #[test]
    fn test_status_detected_from_values_alone() {
        let a = activity(
            "order_updated",
            Some(json!({"status": "under_procurement"})),
            Some(json!({"status": "under_cutting"})),
        );
        let n = narrate(&a);
        assert_eq!(n.title, STATUS_TITLE);
        assert_eq!(n.subtitle, "Material received, cutting started");
    }

    #[test]
    fn test_status_type_without_values_uses_description() {
        let mut a = activity("order_status_changed", None, None);
        a.activity_description = Some("Moved to QC by floor lead".into());
        assert_eq!(narrate(&a).subtitle, "Moved to QC by floor lead");

        a.activity_description = None;
        assert_eq!(narrate(&a).subtitle, "Status updated");
    }

    #[test]
    fn test_typed_activity_uses_description() {
        let mut a = activity("payment_received", None, None);
        a.activity_description = Some("Payment of 800.00 received via UPI".into());
        let n = narrate(&a);
        assert_eq!(n.title, "Payment Received");
        assert_eq!(n.subtitle, "Payment of 800.00 received via UPI");
    }

    #[test]
    fn test_order_updated_lists_changed_fields() {
        let a = activity(
            "order_updated",
            Some(json!({"notes": "old", "status": "confirmed", "updated_at": "t1"})),
            Some(json!({"notes": "new", "status": "confirmed", "expected_delivery_date": "2024-05-01", "updated_at": "t2"})),
        );
        let n = narrate(&a);
        assert_eq!(n.title, "Order Updated");
        assert_eq!(n.subtitle, "Changed Notes, Expected Delivery Date");
    }

    #[test]
    fn test_unknown_type_degrades_to_description() {
        let mut a = activity("courier_booked", None, None);
        a.activity_description = Some("Courier booked with BlueDart".into());
        let n = narrate(&a);
        assert_eq!(n.title, "Courier booked with BlueDart");
        assert_eq!(n.subtitle, "Courier booked with BlueDart");

        a.activity_description = Some("   ".into());
        let n = narrate(&a);
        assert_eq!(n.title, "Courier Booked");
        assert_eq!(n.subtitle, "");
    }
}
