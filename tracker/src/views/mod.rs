//! Role-scoped views
//!
//! Each role gets a thin query/command layer over [`AppState`]. The
//! views own input-boundary concerns: Arabic-Indic digit normalization,
//! numeric validation and required-field checks all happen here, before
//! a payload ever reaches the lifecycle engine. The engine trusts its
//! callers and does not re-validate.

pub mod delegate;
pub mod driver;
pub mod manager;

use shared::{Role, User};

use crate::core::AppState;
use crate::utils::{AppError, AppResult};

/// Resolve the logged-in user and check the mounted role
pub(crate) fn require_role(state: &AppState, role: Role) -> AppResult<User> {
    match state.current_user() {
        Some(user) if user.role == role => Ok(user.clone()),
        Some(_) => Err(AppError::invalid("Action not available for this role")),
        None => Err(AppError::invalid("No active session")),
    }
}
