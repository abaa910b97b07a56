//! Utility helpers: errors, logging, digit normalization, timestamps

pub mod digits;
pub mod error;
pub mod ids;
pub mod links;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
