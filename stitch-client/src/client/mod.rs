//! Store implementations

mod memory;
mod rest;

pub use memory::InMemoryStore;
pub use rest::RestStore;
