//! One-time receipt foreign-key backfill
//!
//! Older receipts point at their order through a copy of the order number.
//! Writing the order id onto them lets the number path retire.

use shared::error::{AppError, AppResult, ErrorCode};
use stitch_client::{ClientError, OrderStore};

use super::reconciler::ReceiptLink;

fn link_error(link: &ReceiptLink, err: ClientError) -> AppError {
    let err = match err {
        ClientError::NotFound(_) => AppError::receipt_not_found(&link.receipt_id),
        other => AppError::with_message(ErrorCode::ReceiptLinkFailed, other.to_string())
            .with_detail("receipt_id", link.receipt_id.as_str()),
    };
    err.with_detail("order_id", link.order_id.as_str())
}

/// Write each link through `store`, stopping at the first failure.
///
/// The target order is looked up by id first, so a link never points at a
/// row that doesn't exist. Returns the number of receipts linked.
pub async fn backfill_links(store: &dyn OrderStore, links: &[ReceiptLink]) -> AppResult<usize> {
    let mut checked: Option<&str> = None;
    for link in links {
        if checked != Some(link.order_id.as_str()) {
            match store.order_by_id(&link.order_id).await {
                Ok(_) => checked = Some(link.order_id.as_str()),
                Err(ClientError::NotFound(_)) => {
                    return Err(AppError::with_message(
                        ErrorCode::OrderNotFound,
                        format!("Order id {} not found", link.order_id),
                    )
                    .with_detail("order_id", link.order_id.as_str()));
                }
                Err(e) => return Err(e.into()),
            }
        }

        store
            .link_receipt(&link.receipt_id, &link.order_id)
            .await
            .map_err(|e| link_error(link, e))?;
        tracing::info!(
            receipt_id = %link.receipt_id,
            receipt_number = link.receipt_number.as_deref().unwrap_or("-"),
            order_id = %link.order_id,
            "Backfilled receipt reference"
        );
    }
    Ok(links.len())
}
