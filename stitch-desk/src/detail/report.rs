//! Plain-text order report

use std::fmt;

use super::{LineDetail, OrderDetail};
use crate::activity::humanize;
use crate::pricing::gst;
use crate::receipts::MatchedBy;

const LABEL_WIDTH: usize = 24;

fn money_row(f: &mut fmt::Formatter<'_>, label: &str, amount: f64) -> fmt::Result {
    writeln!(f, "  {:<width$}{:>12.2}", label, amount, width = LABEL_WIDTH)
}

fn write_line(f: &mut fmt::Formatter<'_>, line: &LineDetail) -> fmt::Result {
    let name = line.product_description.as_deref().unwrap_or("Item");
    write!(f, "  {} [{}]", name, line.item_id)?;
    if let Some(color) = line.color.as_deref() {
        write!(f, " {}", color)?;
    }
    writeln!(
        f,
        "  {} pcs @ {:.2}, GST {}%",
        line.pieces, line.unit_price, line.gst_rate
    )?;

    for size in &line.sizes {
        writeln!(
            f,
            "    {:<8}{:>6} x {:>10.2} = {:>12.2}",
            size.size, size.quantity, size.unit_price, size.amount
        )?;
    }
    for custom in &line.customizations {
        let kind = custom.kind.as_deref().map(humanize).unwrap_or_default();
        let details = custom.details.as_deref().or(custom.name.as_deref()).unwrap_or("");
        writeln!(f, "    + {} {}", kind, details)?;
    }
    writeln!(f, "    Line total {:.2} (tax {:.2})", line.amount, line.tax)
}

impl fmt::Display for OrderDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = &self.order;
        writeln!(
            f,
            "Order {} ({})",
            order.order_number,
            humanize(order.status.as_str())
        )?;
        if let Some(date) = order.order_date {
            write!(f, "Ordered {}", date)?;
            if let Some(due) = order.expected_delivery_date {
                write!(f, ", delivery {}", due)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nItems")?;
        if self.lines.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for line in &self.lines {
            write_line(f, line)?;
        }

        writeln!(f, "\nSummary")?;
        money_row(f, "Subtotal", self.summary.subtotal)?;
        if self.gst.is_empty() {
            money_row(f, &gst::label(0.0), 0.0)?;
        }
        for line in &self.gst {
            money_row(f, &gst::label(line.rate), line.amount)?;
        }
        for charge in &self.additional_charges {
            money_row(f, &charge.name, charge.amount)?;
        }
        money_row(f, "Grand total", self.summary.grand_total)?;

        writeln!(f, "\nPayments")?;
        for matched in &self.payments.matched {
            let receipt = &matched.receipt;
            let number = receipt.receipt_number.as_deref().unwrap_or(&receipt.id);
            let date = receipt
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let via = match matched.matched_by {
                MatchedBy::OrderId => "",
                MatchedBy::OrderNumber => " (by order number)",
            };
            writeln!(f, "  {:<14}{:<12}{:>12.2}{}", number, date, receipt.amount, via)?;
        }
        money_row(f, "Total paid", self.payments.total_paid)?;
        money_row(f, "Pending", self.payments.pending_amount)?;
        if self.payments.overpaid_amount > 0.0 {
            money_row(f, "Overpaid", self.payments.overpaid_amount)?;
        }
        writeln!(f, "  Payment status: {}", humanize(self.payments.state.as_str()))?;

        if !self.drift.is_empty() {
            writeln!(f, "\nWarnings")?;
            for drift in &self.drift {
                writeln!(
                    f,
                    "  Stored {} {:.2} differs from computed {:.2}",
                    drift.field, drift.persisted, drift.computed
                )?;
            }
        }

        if !self.timeline.is_empty() {
            writeln!(f, "\nHistory")?;
            for entry in &self.timeline {
                let when = entry
                    .performed_at
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                write!(f, "  {:<17} {}", when, entry.title)?;
                if !entry.subtitle.is_empty() && entry.subtitle != entry.title {
                    write!(f, ": {}", entry.subtitle)?;
                }
                writeln!(f, " ({})", entry.performer)?;
            }
        }
        Ok(())
    }
}

/// Render the report printed by the CLI
pub fn render_text(detail: &OrderDetail) -> String {
    detail.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::OrderSnapshot;
    use crate::pricing::AdditionalCharge;
    use shared::models::{Order, OrderActivity, OrderItem, OrderStatus};

    #[test]
    fn test_report_sections() {
        let snapshot = OrderSnapshot {
            order: Order {
                id: "o-1".into(),
                order_number: "TV-0042".into(),
                status: OrderStatus::UnderStitching,
                final_amount: 999.0,
                ..Default::default()
            },
            items: vec![OrderItem {
                id: "i-1".into(),
                order_id: "o-1".into(),
                product_description: Some("Hoodie".into()),
                unit_price: 500.0,
                sizes_quantities: [("L".to_string(), 2)].into_iter().collect(),
                ..Default::default()
            }],
            activities: vec![OrderActivity {
                id: "a-1".into(),
                activity_type: "order_created".into(),
                activity_description: Some("Order created".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let detail = OrderDetail::build(&snapshot, &[AdditionalCharge::new("Courier", 80.0)]);
        let text = render_text(&detail);

        assert!(text.starts_with("Order TV-0042 (Under Stitching)\n"));
        assert!(text.contains("Hoodie [i-1]"));
        assert!(text.contains("GST (0%)"));
        assert!(text.contains("Courier"));
        assert!(text.contains("1080.00"));
        assert!(text.contains("Stored final_amount 999.00 differs from computed 1080.00"));
        assert!(text.contains("Order Created: Order created (System)"));
        assert!(text.contains("Payment status: Pending"));
    }
}
