//! GST breakdown grouped by rate

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderItem};
use std::collections::BTreeMap;

use super::money::{add_money, sum_money, to_decimal, to_f64};
use super::order_summary::{effective_rate, item_tax};

/// Tax collected at one rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstLine {
    /// Rate in percent
    pub rate: f64,
    pub amount: f64,
}

/// Per-rate tax totals, ascending by rate, zero rates excluded
pub fn rate_totals(items: &[OrderItem], order: &Order) -> BTreeMap<Decimal, Decimal> {
    let mut totals: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    for item in items {
        let rate = effective_rate(item, order);
        if rate.is_zero() {
            continue;
        }
        let total = totals.entry(rate.normalize()).or_default();
        *total = add_money(*total, item_tax(item, order));
    }
    totals
}

/// Group line tax by effective rate.
///
/// An empty result means no taxed lines; callers show a literal "GST (0%)"
/// row in that case.
pub fn breakdown(items: &[OrderItem], order: &Order) -> Vec<GstLine> {
    rate_totals(items, order)
        .into_iter()
        .map(|(rate, amount)| GstLine {
            rate: rate.to_f64().unwrap_or_default(),
            amount: to_f64(amount),
        })
        .collect()
}

/// Sum of a breakdown
pub fn total(lines: &[GstLine]) -> f64 {
    to_f64(sum_money(lines.iter().map(|line| to_decimal(line.amount))))
}

/// Display label for a rate, e.g. `GST (18%)` or `GST (2.5%)`
pub fn label(rate: f64) -> String {
    format!("GST ({}%)", to_decimal(rate).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::money::money_eq;
    use crate::pricing::order_summary::{summarize, tax_amount};
    use proptest::prelude::*;

    fn order(gst_rate: Option<f64>) -> Order {
        Order {
            id: "o-1".into(),
            order_number: "TV-0001".into(),
            gst_rate,
            ..Default::default()
        }
    }

    fn item(id: &str, qty: i64, unit_price: f64, gst_rate: Option<f64>) -> OrderItem {
        OrderItem {
            id: id.into(),
            order_id: "o-1".into(),
            quantity: qty,
            unit_price,
            gst_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_and_sorts_by_rate() {
        let items = vec![
            item("i-1", 10, 100.0, Some(18.0)),
            item("i-2", 4, 250.0, Some(5.0)),
            item("i-3", 1, 500.0, None),
            item("i-4", 2, 100.0, Some(18.0)),
        ];
        let lines = breakdown(&items, &order(Some(12.0)));
        assert_eq!(
            lines,
            vec![
                GstLine { rate: 5.0, amount: 50.0 },
                GstLine { rate: 12.0, amount: 60.0 },
                GstLine { rate: 18.0, amount: 216.0 },
            ]
        );
        assert_eq!(total(&lines), 326.0);
    }

    #[test]
    fn test_zero_rate_lines_excluded() {
        let items = vec![item("i-1", 1, 100.0, Some(0.0)), item("i-2", 1, 100.0, None)];
        assert!(breakdown(&items, &order(None)).is_empty());

        let lines = breakdown(&items, &order(Some(18.0)));
        assert_eq!(lines, vec![GstLine { rate: 18.0, amount: 18.0 }]);
    }

    #[test]
    fn test_equal_rates_with_different_scale_merge() {
        let items = vec![item("i-1", 1, 100.0, Some(18.0)), item("i-2", 1, 100.0, Some(18.00))];
        let lines = breakdown(&items, &order(None));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 36.0);
    }

    #[test]
    fn test_label() {
        assert_eq!(label(18.0), "GST (18%)");
        assert_eq!(label(2.5), "GST (2.5%)");
    }

    fn item_strategy() -> impl Strategy<Value = OrderItem> {
        (
            0i64..30,
            0u32..100_000,
            prop::option::of(prop::sample::select(vec![0.0, 2.5, 5.0, 12.0, 18.0, 28.0])),
        )
            .prop_map(|(qty, cents, rate)| item("i", qty, f64::from(cents) / 100.0, rate))
    }

    proptest! {
        #[test]
        fn prop_breakdown_sums_to_tax_amount(
            items in prop::collection::vec(item_strategy(), 0..8),
            order_rate in prop::option::of(prop::sample::select(vec![0.0, 5.0, 18.0])),
        ) {
            let o = order(order_rate);
            let exact: Decimal = rate_totals(&items, &o).values().copied().sum();
            prop_assert_eq!(exact, tax_amount(&items, &o));

            let summary = summarize(&items, &o);
            prop_assert!(money_eq(total(&breakdown(&items, &o)), summary.tax_amount));
        }
    }
}
