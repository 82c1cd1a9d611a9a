//! Order Pricing
//!
//! - [`sort_sizes`]: display order for a size breakdown
//! - [`line_amount`]: monetary total for one line
//! - [`summarize`]: subtotal, tax and grand total
//! - [`gst::breakdown`]: tax grouped by rate
//!
//! All arithmetic happens in `Decimal` (see [`money`]); results are `f64`
//! rounded to 2 decimal places.

pub mod gst;
pub mod money;
mod order_summary;
mod size_price;
mod size_sorter;

pub use gst::GstLine;
pub use order_summary::*;
pub use size_price::*;
pub use size_sorter::*;
