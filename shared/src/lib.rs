//! Shared types for the Stitch order desk
//!
//! Row types for the hosted store, the typed line-item extras bag,
//! lenient decoding helpers, and the unified error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::*;
pub use serde::{Deserialize, Serialize};
