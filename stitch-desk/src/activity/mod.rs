//! Order activity narration

mod narrator;
mod timeline;

pub use narrator::*;
pub use timeline::*;
