//! Shared data model for the order intake and dispatch tracker
//!
//! This crate holds the record types that round-trip through local
//! storage: users, orders, the per-order activity log, and the payload
//! structs the application layers pass into the lifecycle engine.
//!
//! Field names serialize in camelCase to stay byte-compatible with the
//! persisted records of the original device storage format.

pub mod models;

pub use models::order::{
    ActivityLogEntry, LogAction, Order, OrderDraft, OrderStatus, Price, ServiceCategory,
    StatusPatch,
};
pub use models::report::{ManagerAnalytics, ProgressStats};
pub use models::user::{Brand, Role, User, UserCreate, UserUpdate};
