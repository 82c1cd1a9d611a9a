//! Receipt Reconciler
//!
//! Decides which receipts pay for an order and derives the outstanding
//! balance.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{Order, Receipt};
use std::cmp::Ordering;

use crate::pricing::money::{MONEY_TOLERANCE, sum_money, to_decimal, to_f64};

/// Which reference tied a receipt to the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    /// `reference_id` equals the order id
    OrderId,
    /// Legacy row: `reference_number` equals the order number and the
    /// reference type is "order"
    OrderNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedReceipt {
    pub receipt: Receipt,
    pub matched_by: MatchedBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Pending,
    Completed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of reconciling receipts against one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Matched receipts, newest first
    pub matched: Vec<MatchedReceipt>,
    pub total_paid: f64,
    /// Outstanding balance, never negative
    pub pending_amount: f64,
    /// Amount paid beyond the grand total, never negative
    pub overpaid_amount: f64,
    pub state: PaymentState,
}

/// Foreign key to write onto a receipt that only matched by number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLink {
    pub receipt_id: String,
    pub receipt_number: Option<String>,
    pub order_id: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// How `receipt` matches `order`, if it does.
///
/// A receipt that carries a direct reference is judged on that alone; the
/// number path only applies to rows without one. References compare exactly,
/// the same way [`stitch_client::OrderStore::receipts_for`] filters them.
pub fn match_receipt(order: &Order, receipt: &Receipt) -> Option<MatchedBy> {
    if let Some(id) = non_blank(receipt.reference_id.as_deref()) {
        return (id == order.id).then_some(MatchedBy::OrderId);
    }

    let number = non_blank(receipt.reference_number.as_deref())?;
    (number == order.order_number && receipt.references_order_type())
        .then_some(MatchedBy::OrderNumber)
}

fn newest_first(a: &Receipt, b: &Receipt) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reconcile `receipts` against `order`'s grand total
pub fn reconcile(order: &Order, receipts: &[Receipt]) -> Reconciliation {
    let mut matched: Vec<MatchedReceipt> = receipts
        .iter()
        .filter_map(|receipt| {
            match_receipt(order, receipt).map(|matched_by| MatchedReceipt {
                receipt: receipt.clone(),
                matched_by,
            })
        })
        .collect();
    matched.sort_by(|a, b| newest_first(&a.receipt, &b.receipt));

    let legacy = matched
        .iter()
        .filter(|m| m.matched_by == MatchedBy::OrderNumber)
        .count();
    if legacy > 0 {
        tracing::warn!(
            order_number = %order.order_number,
            legacy,
            "Receipts matched by order number only"
        );
    }

    let paid = sum_money(matched.iter().map(|m| to_decimal(m.receipt.amount)));
    let balance = to_decimal(order.grand_total()).saturating_sub(paid);
    let pending = balance.max(Decimal::ZERO);
    let overpaid = (-balance).max(Decimal::ZERO);

    let state = if pending < MONEY_TOLERANCE {
        PaymentState::Completed
    } else {
        PaymentState::Pending
    };

    if overpaid >= MONEY_TOLERANCE {
        tracing::warn!(
            order_number = %order.order_number,
            overpaid = %overpaid,
            "Order is overpaid"
        );
    }

    Reconciliation {
        matched,
        total_paid: to_f64(paid),
        pending_amount: to_f64(pending),
        overpaid_amount: to_f64(overpaid),
        state,
    }
}

/// Receipts that reference `order` only by number, as links to backfill
pub fn legacy_links(order: &Order, receipts: &[Receipt]) -> Vec<ReceiptLink> {
    receipts
        .iter()
        .filter(|r| match_receipt(order, r) == Some(MatchedBy::OrderNumber))
        .map(|r| ReceiptLink {
            receipt_id: r.id.clone(),
            receipt_number: r.receipt_number.clone(),
            order_id: order.id.clone(),
        })
        .collect()
}
