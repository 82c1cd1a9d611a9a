//! Order Summary Aggregator
//!
//! Subtotal, tax and grand total for a set of line items.
//!
//! Per-item tax is rounded to 2 decimal places before it is summed, so the
//! GST breakdown in [`super::gst`] always adds up to `tax_amount`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderItem};

use super::money::{
    MONEY_TOLERANCE, add_money, mul_money, round_money, sum_money, to_decimal, to_f64,
};
use super::size_price::item_amount;

/// Extra charge added on top of the item totals (courier, packing, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCharge {
    pub name: String,
    pub amount: f64,
}

impl AdditionalCharge {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Result of order summary calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of all line amounts
    pub subtotal: f64,
    /// Sum of per-item tax
    pub tax_amount: f64,
    /// Sum of caller-supplied charges (0 unless added)
    pub additional_charges: f64,
    /// subtotal + tax_amount + additional_charges
    pub grand_total: f64,
}

/// A persisted total that disagrees with the recomputed one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalDrift {
    pub field: String,
    pub persisted: f64,
    pub computed: f64,
}

/// Tax rate that applies to a line: its own, else the order's, else 0
pub fn effective_rate(item: &OrderItem, order: &Order) -> Decimal {
    item.gst_rate
        .or(order.gst_rate)
        .map(to_decimal)
        .unwrap_or_default()
}

/// Tax for one line, rounded to 2 decimal places
pub fn item_tax(item: &OrderItem, order: &Order) -> Decimal {
    round_money(mul_money(item_amount(item), effective_rate(item, order)) / Decimal::ONE_HUNDRED)
}

/// Exact subtotal of `items`
pub fn subtotal(items: &[OrderItem]) -> Decimal {
    sum_money(items.iter().map(item_amount))
}

/// Exact tax total of `items`
pub fn tax_amount(items: &[OrderItem], order: &Order) -> Decimal {
    sum_money(items.iter().map(|item| item_tax(item, order)))
}

/// Summarize `items` under `order`'s tax rate.
///
/// Additional charges are not included; see
/// [`OrderSummary::with_additional_charges`].
pub fn summarize(items: &[OrderItem], order: &Order) -> OrderSummary {
    let subtotal = subtotal(items);
    let tax = tax_amount(items, order);

    OrderSummary {
        subtotal: to_f64(subtotal),
        tax_amount: to_f64(tax),
        additional_charges: 0.0,
        grand_total: to_f64(add_money(subtotal, tax)),
    }
}

impl OrderSummary {
    /// Add charges to the grand total
    pub fn with_additional_charges(mut self, charges: &[AdditionalCharge]) -> Self {
        let extra = sum_money(charges.iter().map(|c| to_decimal(c.amount)));
        let charges_total = add_money(to_decimal(self.additional_charges), extra);
        self.additional_charges = to_f64(charges_total);
        self.grand_total = to_f64(add_money(to_decimal(self.grand_total), extra));
        self
    }

    /// Compare with the totals stored on the order row.
    ///
    /// The order row keeps `total_amount`, `tax_amount` and `final_amount`
    /// redundantly; an edit that bypassed recalculation shows up here.
    pub fn drift_from(&self, order: &Order) -> Vec<TotalDrift> {
        [
            ("total_amount", order.total_amount, self.subtotal),
            ("tax_amount", order.tax_amount, self.tax_amount),
            ("final_amount", order.final_amount, self.grand_total),
        ]
        .into_iter()
        .filter(|(_, persisted, computed)| {
            to_decimal(*persisted)
                .saturating_sub(to_decimal(*computed))
                .abs()
                >= MONEY_TOLERANCE
        })
        .map(|(field, persisted, computed)| TotalDrift {
            field: field.to_string(),
            persisted,
            computed,
        })
        .collect()
    }
}
