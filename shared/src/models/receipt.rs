//! Receipt Model

use crate::util::{lenient_datetime, lenient_f64, lenient_opt_string, lenient_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference type tag used by receipts that point at an order
pub const REFERENCE_TYPE_ORDER: &str = "order";

/// Payment receipt row
///
/// A receipt points at what it pays for either through `reference_id` or,
/// for older rows, through a copy of the human-readable number plus a
/// `reference_type` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub reference_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub reference_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub receipt_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Receipt {
    /// Whether the reference type tag names an order (case-insensitive)
    pub fn references_order_type(&self) -> bool {
        self.reference_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(REFERENCE_TYPE_ORDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_receipt_row() {
        let receipt: Receipt = serde_json::from_value(json!({
            "id": "r-1",
            "reference_id": null,
            "reference_number": "TV-0042",
            "reference_type": "Order",
            "amount": "800.00",
            "receipt_number": "RCP-7",
            "created_at": "2024-04-03T09:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(receipt.reference_id, None);
        assert_eq!(receipt.amount, 800.0);
        assert!(receipt.references_order_type());
        assert!(receipt.created_at.is_some());
    }

    #[test]
    fn test_reference_type_other() {
        let receipt = Receipt {
            id: "r-2".into(),
            reference_type: Some("invoice".into()),
            ..Default::default()
        };
        assert!(!receipt.references_order_type());
        assert!(!Receipt::default().references_order_type());
    }
}
