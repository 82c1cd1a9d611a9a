use shared::error::{AppError, AppResult, ErrorCode};
use stitch_client::{ClientError, OrderStore};

use super::OrderSnapshot;

/// Undecodable rows get the code of the table they came from
fn row_error(err: ClientError, code: ErrorCode) -> AppError {
    match err {
        ClientError::InvalidRow(msg) => AppError::with_message(code, msg),
        other => other.into(),
    }
}

/// Fetch one order and everything hanging off it.
///
/// The order comes first (the other lookups need its id); items, receipts,
/// activities and size types are then fetched concurrently.
pub async fn load_snapshot(store: &dyn OrderStore, order_number: &str) -> AppResult<OrderSnapshot> {
    let order_number = order_number.trim();
    if order_number.is_empty() {
        return Err(AppError::validation("order number is empty"));
    }

    let order = match store.order_by_number(order_number).await {
        Ok(order) => order,
        Err(ClientError::NotFound(_)) => return Err(AppError::order_not_found(order_number)),
        Err(e) => {
            let err = row_error(e, ErrorCode::OrderInvalid);
            return Err(err.with_detail("order_number", order_number));
        }
    };

    let (items, receipts, activities, size_types) = tokio::try_join!(
        async {
            store
                .order_items(&order.id)
                .await
                .map_err(|e| row_error(e, ErrorCode::OrderItemInvalid))
        },
        async { store.receipts_for(&order).await.map_err(AppError::from) },
        async { store.activities(&order.id).await.map_err(AppError::from) },
        async { store.size_types().await.map_err(AppError::from) },
    )?;

    tracing::debug!(
        order_number,
        items = items.len(),
        receipts = receipts.len(),
        activities = activities.len(),
        size_types = size_types.len(),
        "Loaded order snapshot"
    );

    Ok(OrderSnapshot {
        order,
        items,
        receipts,
        activities,
        size_types,
    })
}
