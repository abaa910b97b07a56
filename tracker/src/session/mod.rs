//! Session persistence
//!
//! Three independently keyed JSON records mirror the in-memory model
//! verbatim: the user directory, the full order list and the
//! current-user snapshot. Each is rewritten whole after every mutation.

pub mod persistence;

pub use persistence::SessionStorage;
