//! One CLI run against a store

use serde::Serialize;
use shared::error::AppResult;
use stitch_client::{InMemoryStore, OrderStore, RestStore};

use crate::cli::Cli;
use crate::core::Config;
use crate::detail::{OrderDetail, load_snapshot};
use crate::receipts::{backfill_links, legacy_links};

#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub detail: OrderDetail,
    /// Receipts whose order reference was written during this run
    pub backfilled: usize,
}

/// Open the store the run reads from
pub async fn open_store(cli: &Cli, config: &Config) -> AppResult<Box<dyn OrderStore>> {
    match &cli.snapshot {
        Some(path) => {
            let store = InMemoryStore::load(path).await?;
            tracing::info!(path = %path.display(), "Using snapshot file");
            Ok(Box::new(store))
        }
        None => {
            let store = RestStore::new(&config.store_config())?;
            tracing::info!(url = store.rest_url(), "Using REST store");
            Ok(Box::new(store))
        }
    }
}

pub async fn run_with_store(store: &dyn OrderStore, cli: &Cli) -> AppResult<RunOutput> {
    let mut snapshot = load_snapshot(store, &cli.order_number).await?;

    let mut backfilled = 0;
    if cli.backfill_receipts {
        let links = legacy_links(&snapshot.order, &snapshot.receipts);
        if links.is_empty() {
            tracing::info!(order_number = %snapshot.order.order_number, "No receipts to backfill");
        } else {
            backfilled = backfill_links(store, &links).await?;
            snapshot.receipts = store.receipts_for(&snapshot.order).await?;
        }
    }

    let detail = OrderDetail::build(&snapshot, &cli.charges);
    tracing::info!(
        order_number = %detail.order.order_number,
        grand_total = detail.summary.grand_total,
        pending = detail.payments.pending_amount,
        "Order detail built"
    );
    Ok(RunOutput { detail, backfilled })
}

pub async fn run(cli: &Cli, config: &Config) -> AppResult<RunOutput> {
    let store = open_store(cli, config).await?;
    run_with_store(store.as_ref(), cli).await
}
