//! Size-Based Price Calculator
//!
//! A line either has a size breakdown (quantity per size, optional price per
//! size) or a flat quantity at the base unit price.

use rust_decimal::prelude::*;
use shared::models::{OrderItem, SizePrices, SizeQuantities};

use super::money::{mul_money, sum_money, to_decimal};

/// Unit price for one size: the override when present, else the base price
pub fn unit_price_for(size: &str, overrides: Option<&SizePrices>, base_price: f64) -> Decimal {
    let price = overrides
        .and_then(|prices| prices.get(size))
        .copied()
        .unwrap_or(base_price);
    to_decimal(price)
}

/// Monetary total for one line.
///
/// Sizes with quantity <= 0 contribute nothing. An empty breakdown means a
/// simple line, priced as `flat_quantity * base_price`.
pub fn line_amount(
    quantities: &SizeQuantities,
    overrides: Option<&SizePrices>,
    base_price: f64,
    flat_quantity: i64,
) -> Decimal {
    if quantities.is_empty() {
        if flat_quantity <= 0 {
            return Decimal::ZERO;
        }
        return mul_money(Decimal::from(flat_quantity), to_decimal(base_price));
    }

    sum_money(
        quantities
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(size, qty)| {
                mul_money(Decimal::from(*qty), unit_price_for(size, overrides, base_price))
            }),
    )
}

/// [`line_amount`] for a stored line item
pub fn item_amount(item: &OrderItem) -> Decimal {
    line_amount(
        &item.sizes_quantities,
        item.size_prices(),
        item.unit_price,
        item.quantity,
    )
}

/// Total pieces on a line, counted the same way [`line_amount`] prices them
pub fn item_pieces(item: &OrderItem) -> i64 {
    if item.sizes_quantities.is_empty() {
        return item.quantity.max(0);
    }
    item.sizes_quantities
        .values()
        .filter(|q| **q > 0)
        .fold(0, |acc: i64, q| acc.saturating_add(*q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quantities(pairs: &[(&str, i64)]) -> SizeQuantities {
        pairs.iter().map(|(s, q)| (s.to_string(), *q)).collect()
    }

    fn prices(pairs: &[(&str, f64)]) -> SizePrices {
        pairs.iter().map(|(s, p)| (s.to_string(), *p)).collect()
    }

    #[test]
    fn test_base_price_for_every_size() {
        let q = quantities(&[("S", 10), ("M", 5)]);
        assert_eq!(line_amount(&q, None, 100.0, 0), Decimal::from(1500));
    }

    #[test]
    fn test_override_for_one_size() {
        let q = quantities(&[("S", 10), ("M", 5)]);
        let p = prices(&[("S", 120.0)]);
        assert_eq!(line_amount(&q, Some(&p), 100.0, 0), Decimal::from(1700));
        assert_eq!(unit_price_for("S", Some(&p), 100.0), Decimal::from(120));
        assert_eq!(unit_price_for("M", Some(&p), 100.0), Decimal::from(100));
    }

    #[test]
    fn test_non_positive_sizes_skipped() {
        let q = quantities(&[("S", 0), ("M", -3), ("L", 2)]);
        assert_eq!(line_amount(&q, None, 50.0, 99), Decimal::from(100));
    }

    #[test]
    fn test_flat_quantity_fallback() {
        let empty = SizeQuantities::new();
        assert_eq!(line_amount(&empty, None, 12.5, 4), Decimal::from(50));
        assert_eq!(line_amount(&empty, None, 12.5, 0), Decimal::ZERO);
        assert_eq!(line_amount(&empty, None, 12.5, -4), Decimal::ZERO);
    }

    #[test]
    fn test_nan_prices_count_as_zero() {
        let q = quantities(&[("S", 2), ("M", 3)]);
        let p = prices(&[("S", f64::NAN)]);
        assert_eq!(line_amount(&q, Some(&p), 10.0, 0), Decimal::from(30));
        assert_eq!(line_amount(&q, None, f64::NAN, 0), Decimal::ZERO);
    }

    #[test]
    fn test_fractional_prices_are_exact() {
        let q = quantities(&[("S", 3)]);
        assert_eq!(line_amount(&q, None, 0.1, 0), Decimal::new(3, 1));
    }

    #[test]
    fn test_out_of_range_sizes_count_as_zero() {
        let q = quantities(&[("S", 10_000_000_000), ("M", 2)]);
        let p = prices(&[("S", 1e20)]);
        assert_eq!(line_amount(&q, Some(&p), 10.0, 0), Decimal::from(20));
        assert_eq!(line_amount(&q, None, 1e20, 0), Decimal::new(2, 0) * to_decimal(1e20));

        let empty = SizeQuantities::new();
        assert_eq!(line_amount(&empty, None, 1e20, i64::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_pieces_saturate() {
        let item = OrderItem {
            sizes_quantities: quantities(&[("S", i64::MAX), ("M", i64::MAX)]),
            ..Default::default()
        };
        assert_eq!(item_pieces(&item), i64::MAX);
    }

    #[test]
    fn test_item_helpers() {
        let item = OrderItem {
            id: "i-1".into(),
            order_id: "o-1".into(),
            unit_price: 100.0,
            quantity: 15,
            sizes_quantities: quantities(&[("S", 10), ("M", 5), ("L", 0)]),
            ..Default::default()
        };
        assert_eq!(item_amount(&item), Decimal::from(1500));
        assert_eq!(item_pieces(&item), 15);
    }

    fn size_map(range: std::ops::Range<i64>) -> impl Strategy<Value = SizeQuantities> {
        prop::collection::vec(("[A-Z0-9]{1,4}", range), 0..10)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_non_positive_quantities_total_zero(
            q in size_map(-100..1),
            base in 0u32..100_000,
        ) {
            prop_assume!(!q.is_empty());
            let base = f64::from(base) / 100.0;
            prop_assert_eq!(line_amount(&q, None, base, 7), Decimal::ZERO);
        }

        #[test]
        fn prop_identical_overrides_change_nothing(
            q in size_map(-10..200),
            base in 0u32..100_000,
            flat in 0i64..50,
        ) {
            let base = f64::from(base) / 100.0;
            let overrides: SizePrices = q.keys().map(|k| (k.clone(), base)).collect();
            prop_assert_eq!(
                line_amount(&q, Some(&overrides), base, flat),
                line_amount(&q, None, base, flat)
            );
        }
    }
}
