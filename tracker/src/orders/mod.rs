//! Order store and lifecycle engine
//!
//! `OrderStore` owns the canonical order sequence and answers role-scoped
//! queries without mutating state. `OrderManager` is the only writer: every
//! role action goes through its mutation contracts, which merge fields,
//! stamp the update time and append exactly one activity log entry.

pub mod manager;
pub mod store;

pub use manager::OrderManager;
pub use store::{OrderStore, Placement, SortDir, SortKey};
