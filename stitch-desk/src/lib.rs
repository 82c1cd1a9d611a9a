//! Stitch Desk - order pricing and payment reconciliation
//!
//! Derivations over already-fetched order rows:
//!
//! - **pricing** (`pricing`): size ordering, size-based line amounts, order
//!   summary, GST breakdown
//! - **receipts** (`receipts`): which receipts pay an order, pending balance
//! - **activity** (`activity`): status narration and the order timeline
//! - **detail** (`detail`): loads one order from a store and composes the above
//!
//! # Module layout
//!
//! ```text
//! stitch-desk/src/
//! ├── core/          # configuration
//! ├── utils/         # logging
//! ├── pricing/       # money, sizes, summary, GST
//! ├── receipts/      # reconciliation, receipt backfill
//! ├── activity/      # narration, timeline
//! ├── detail/        # snapshot loading, order detail, text report
//! ├── cli.rs         # clap arguments
//! └── app.rs         # one CLI run
//! ```
//!
//! Pricing, reconciliation and narration never fail; errors only come from
//! loading data.

pub mod activity;
pub mod app;
pub mod cli;
pub mod core;
pub mod detail;
pub mod pricing;
pub mod receipts;
pub mod utils;

pub use activity::{Narration, TimelineEntry, narrate, timeline};
pub use crate::core::Config;
pub use detail::{OrderDetail, OrderSnapshot, load_snapshot, render_text};
pub use pricing::{AdditionalCharge, GstLine, OrderSummary, line_amount, sort_sizes, summarize};
pub use receipts::{PaymentState, Reconciliation, reconcile};
pub use utils::logger::{init_logger, init_logger_with_file};
