// --- File: crates/stationcal_autocomplete/src/lib.rs ---
// Declare modules within this crate
pub mod debounce;
pub mod error;

pub use debounce::{DebouncedQuery, QueryOptions};
pub use error::QueryError;
