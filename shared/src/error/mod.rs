//! Unified error system
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Error type with code, message, and details
//! - [`ApiResponse`]: Response envelope used for JSON output
//!
//! The pricing and reconciliation functions never fail; these types are
//! used at the data-access, configuration, and CLI layers.
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::OrderItemInvalid, "missing id")
//!     .with_detail("order_id", "o-1");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, 4003);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
