//! Stitch Client - data access for the order desk
//!
//! Reads order, line item, receipt, activity, and size-type rows from the
//! hosted store and hands them over as validated [`shared`] models.
//!
//! - [`RestStore`]: PostgREST-style HTTP API
//! - [`InMemoryStore`]: a JSON snapshot held in memory

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::{InMemoryStore, RestStore};
pub use config::StoreConfig;
pub use error::{ClientError, ClientResult};
pub use store::{OrderStore, StoreSnapshot};
