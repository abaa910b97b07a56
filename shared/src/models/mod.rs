//! Record models persisted to device storage

pub mod order;
pub mod report;
pub mod user;
