//! Payment reconciliation

mod backfill;
mod reconciler;

pub use backfill::backfill_links;
pub use reconciler::*;
