//! Order detail composition
//!
//! Loads everything one order page needs ([`load_snapshot`]) and threads it
//! through the pricing, reconciliation and narration functions
//! ([`OrderDetail::build`]).

mod loader;
mod report;

pub use loader::load_snapshot;
pub use report::render_text;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    AssetRef, Customization, Order, OrderActivity, OrderItem, Receipt, SizeTypeDefinition,
};

use crate::activity::{TimelineEntry, timeline};
use crate::pricing::gst::{self, GstLine};
use crate::pricing::money::{mul_money, to_f64};
use crate::pricing::{
    AdditionalCharge, OrderSummary, TotalDrift, effective_rate, item_amount, item_pieces,
    item_tax, sort_sizes, summarize, unit_price_for,
};
use crate::receipts::{Reconciliation, reconcile};

/// Rows fetched for one order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub receipts: Vec<Receipt>,
    pub activities: Vec<OrderActivity>,
    pub size_types: Vec<SizeTypeDefinition>,
}

/// One size row of a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeLine {
    pub size: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub amount: f64,
}

/// One priced line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDetail {
    pub item_id: String,
    pub product_description: Option<String>,
    pub color: Option<String>,
    pub unit_price: f64,
    pub gst_rate: f64,
    pub pieces: i64,
    /// Size rows in display order; empty for a flat line
    pub sizes: Vec<SizeLine>,
    pub amount: f64,
    pub tax: f64,
    pub customizations: Vec<Customization>,
    /// Reference images followed by mockups
    pub images: Vec<AssetRef>,
}

/// Everything the order page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<LineDetail>,
    pub additional_charges: Vec<AdditionalCharge>,
    pub summary: OrderSummary,
    pub gst: Vec<GstLine>,
    pub payments: Reconciliation,
    pub timeline: Vec<TimelineEntry>,
    /// Persisted totals that disagree with the recomputed ones
    pub drift: Vec<TotalDrift>,
}

fn line_detail(item: &OrderItem, snapshot: &OrderSnapshot) -> LineDetail {
    let overrides = item.size_prices();
    let sizes = sort_sizes(
        &item.sizes_quantities,
        item.size_type_id(),
        &snapshot.size_types,
    )
    .into_iter()
    .map(|(size, quantity)| {
        let unit = unit_price_for(&size, overrides, item.unit_price);
        let amount = if quantity > 0 {
            mul_money(unit, Decimal::from(quantity))
        } else {
            Decimal::ZERO
        };
        SizeLine {
            size,
            quantity,
            unit_price: to_f64(unit),
            amount: to_f64(amount),
        }
    })
    .collect();

    let extras = &item.specifications;
    LineDetail {
        item_id: item.id.clone(),
        product_description: item.product_description.clone(),
        color: item.color.clone(),
        unit_price: item.unit_price,
        gst_rate: to_f64(effective_rate(item, &snapshot.order)),
        pieces: item_pieces(item),
        sizes,
        amount: to_f64(item_amount(item)),
        tax: to_f64(item_tax(item, &snapshot.order)),
        customizations: extras.customizations.clone(),
        images: extras
            .reference_images
            .iter()
            .chain(extras.mockup_images.iter())
            .cloned()
            .collect(),
    }
}

impl OrderDetail {
    pub fn build(snapshot: &OrderSnapshot, additional_charges: &[AdditionalCharge]) -> Self {
        let order = &snapshot.order;
        let summary =
            summarize(&snapshot.items, order).with_additional_charges(additional_charges);
        let drift = summary.drift_from(order);
        if !drift.is_empty() {
            tracing::warn!(
                order_number = %order.order_number,
                fields = ?drift.iter().map(|d| d.field.as_str()).collect::<Vec<_>>(),
                "Persisted totals differ from recomputed totals"
            );
        }

        OrderDetail {
            order: order.clone(),
            lines: snapshot
                .items
                .iter()
                .map(|item| line_detail(item, snapshot))
                .collect(),
            additional_charges: additional_charges.to_vec(),
            summary,
            gst: gst::breakdown(&snapshot.items, order),
            payments: reconcile(order, &snapshot.receipts),
            timeline: timeline(&snapshot.activities),
            drift,
        }
    }

    /// Line by its item id
    pub fn line(&self, item_id: &str) -> Option<&LineDetail> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }
}
