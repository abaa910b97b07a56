//! Application core: configuration and the persisting state shell

pub mod config;
pub mod state;

pub use config::Config;
pub use state::AppState;
