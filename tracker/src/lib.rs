//! Order intake and dispatch tracker for a two-brand home-services
//! business
//!
//! Three roles share one order list: delegates take orders over the
//! phone, drivers work through a brand-scoped pickup queue, the manager
//! oversees both brands and runs the team. Everything lives in memory
//! and is mirrored to local JSON records after every mutation.
//!
//! # Module structure
//!
//! ```text
//! tracker/src/
//! ├── core/        # Config, persisting state shell
//! ├── directory/   # Identity, authentication, alerts
//! ├── orders/      # Order store + lifecycle engine
//! ├── reports/     # Period-bounded projections
//! ├── session/     # JSON persistence
//! ├── views/       # Role-scoped boundaries (delegate/driver/manager)
//! └── utils/       # Errors, logging, digits, timestamps, links
//! ```

pub mod core;
pub mod directory;
pub mod orders;
pub mod reports;
pub mod session;
pub mod utils;
pub mod views;

// Re-export public types
pub use self::core::{AppState, Config};
pub use directory::UserDirectory;
pub use orders::{OrderManager, OrderStore, Placement, SortDir, SortKey};
pub use reports::Period;
pub use session::SessionStorage;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the resulting config
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
