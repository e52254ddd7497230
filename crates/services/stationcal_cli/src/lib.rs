// --- File: crates/services/stationcal_cli/src/lib.rs ---
pub mod render;
pub mod store;

pub use store::StationStore;
