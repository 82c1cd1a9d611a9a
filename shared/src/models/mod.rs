//! Data models
//!
//! Row shapes read from the hosted store. Decoding is lenient about how
//! numbers and JSON columns were written, strict about identifiers.

pub mod activity;
pub mod order;
pub mod order_item;
pub mod receipt;
pub mod size_type;

// Re-exports
pub use activity::*;
pub use order::*;
pub use order_item::*;
pub use receipt::*;
pub use size_type::*;
