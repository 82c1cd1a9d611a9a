//! Order Model

use crate::util::{lenient_date, lenient_f64, lenient_opt_f64, lenient_opt_string, lenient_string};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Stored as a snake_case string. Values this crate doesn't know about are
/// kept verbatim in [`OrderStatus::Other`] so they still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    DesigningDone,
    UnderProcurement,
    UnderCutting,
    UnderStitching,
    UnderQc,
    ReadyForDispatch,
    PartialDispatched,
    Dispatched,
    Rework,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Parse a stored status value ("Under Cutting", "under-cutting" and
    /// "under_cutting" are the same state)
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "designing_done" => Self::DesigningDone,
            "under_procurement" => Self::UnderProcurement,
            "under_cutting" => Self::UnderCutting,
            "under_stitching" => Self::UnderStitching,
            "under_qc" => Self::UnderQc,
            "ready_for_dispatch" => Self::ReadyForDispatch,
            "partial_dispatched" => Self::PartialDispatched,
            "dispatched" => Self::Dispatched,
            "rework" => Self::Rework,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::DesigningDone => "designing_done",
            Self::UnderProcurement => "under_procurement",
            Self::UnderCutting => "under_cutting",
            Self::UnderStitching => "under_stitching",
            Self::UnderQc => "under_qc",
            Self::ReadyForDispatch => "ready_for_dispatch",
            Self::PartialDispatched => "partial_dispatched",
            Self::Dispatched => "dispatched",
            Self::Rework => "rework",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// States where the goods are on the shop floor (rework may be entered from any of these)
    pub fn is_production(&self) -> bool {
        matches!(
            self,
            Self::UnderProcurement
                | Self::UnderCutting
                | Self::UnderStitching
                | Self::UnderQc
                | Self::Rework
        )
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order row
///
/// The monetary totals are persisted redundantly by the order entry screen;
/// the authoritative values are recomputed from the line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub order_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Flat GST rate in percent (18 = 18%)
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub gst_rate: Option<f64>,
    /// Advance collected when the order was booked
    #[serde(default, deserialize_with = "lenient_f64")]
    pub advance_amount: f64,
    /// Persisted subtotal
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    /// Persisted tax amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tax_amount: f64,
    /// Persisted grand total
    #[serde(default, deserialize_with = "lenient_f64")]
    pub final_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance_amount: f64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub sales_manager: Option<String>,
    #[serde(default)]
    pub payment_channel: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Order {
    /// Grand total the receipts are reconciled against
    pub fn grand_total(&self) -> f64 {
        self.final_amount
    }
}
