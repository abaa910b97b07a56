//! Staff directory - identity, authentication and one-shot alerts
//!
//! The directory owns the persisted user list. Login is a lookup, not a
//! challenge: delegates and drivers pick their identity and confirm it
//! with a numeric access code, the manager logs in with the code alone.
//! Every login failure collapses to one generic error so a caller cannot
//! probe which identities or codes exist.

use shared::{Brand, Role, User, UserCreate, UserUpdate};
use tracing::{debug, info, warn};

use crate::utils::ids;
use crate::utils::time::now_stamp;
use crate::utils::{AppError, AppResult};

/// Bootstrap manager seeded on first run
const BOOTSTRAP_MANAGER_ID: &str = "m1";
const BOOTSTRAP_MANAGER_NAME: &str = "المدير العام";

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// First-run directory: a single manager holding both brands, with
    /// the configured access code
    pub fn bootstrap(manager_code: &str) -> Self {
        info!("Seeding bootstrap manager");
        Self {
            users: vec![User {
                id: BOOTSTRAP_MANAGER_ID.to_string(),
                name: BOOTSTRAP_MANAGER_NAME.to_string(),
                role: Role::Manager,
                code: manager_code.to_string(),
                assigned_brands: vec![Brand::Mahfaza, Brand::Badaa],
                is_online: false,
                last_seen: String::new(),
                is_active: true,
                system_alert: None,
            }],
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn get_mut(&mut self, id: &str) -> AppResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User".to_string()))
    }

    /// Active staff of one role, for the login identity picker
    pub fn by_role(&self, role: Role) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.role == role && u.is_active)
            .collect()
    }

    // ── Authentication ──────────────────────────────────────────────────

    /// Manager: the code alone identifies the account (manager codes are
    /// globally unique). Delegate/driver: exact identity + code. Inactive
    /// accounts never authenticate. All failures are indistinguishable.
    pub fn authenticate(
        &self,
        role: Role,
        identity: Option<&str>,
        code: &str,
    ) -> AppResult<&User> {
        let found = match role {
            Role::Manager => self
                .users
                .iter()
                .find(|u| u.role == Role::Manager && u.code == code),
            _ => identity.and_then(|id| {
                self.users
                    .iter()
                    .find(|u| u.role == role && u.id == id && u.code == code)
            }),
        };
        match found {
            Some(user) if user.is_active => {
                info!(user_id = %user.id, role = ?role, "Login succeeded");
                Ok(user)
            }
            _ => {
                warn!(role = ?role, "Login rejected");
                Err(AppError::invalid_credentials())
            }
        }
    }

    // ── Directory management (manager actions) ──────────────────────────

    pub fn create_user(&mut self, payload: UserCreate) -> AppResult<String> {
        if payload.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if payload.assigned_brands.is_empty() {
            return Err(AppError::validation(
                "At least one company must be assigned",
            ));
        }
        self.check_code_free(&payload.code, payload.role, None)?;

        let id = ids::user_id();
        self.users.push(User {
            id: id.clone(),
            name: payload.name,
            role: payload.role,
            code: payload.code,
            assigned_brands: payload.assigned_brands,
            is_online: false,
            last_seen: String::new(),
            is_active: true,
            system_alert: None,
        });
        info!(user_id = %id, "User created");
        Ok(id)
    }

    pub fn set_code(&mut self, id: &str, code: &str) -> AppResult<()> {
        let role = self.get(id).map(|u| u.role).ok_or_else(|| {
            AppError::not_found("User".to_string())
        })?;
        self.check_code_free(code, role, Some(id))?;
        self.get_mut(id)?.code = code.to_string();
        info!(user_id = %id, "Access code reset");
        Ok(())
    }

    pub fn set_brands(&mut self, id: &str, brands: Vec<Brand>) -> AppResult<()> {
        if brands.is_empty() {
            return Err(AppError::validation(
                "At least one company must be assigned",
            ));
        }
        self.get_mut(id)?.assigned_brands = brands;
        Ok(())
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> AppResult<()> {
        self.get_mut(id)?.is_active = active;
        info!(user_id = %id, active, "Activity flag changed");
        Ok(())
    }

    /// Combined update used by the team management form. Absent fields
    /// stay untouched.
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> AppResult<()> {
        if let Some(code) = update.code {
            self.set_code(id, &code)?;
        }
        if let Some(brands) = update.assigned_brands {
            self.set_brands(id, brands)?;
        }
        if let Some(active) = update.is_active {
            self.set_active(id, active)?;
        }
        Ok(())
    }

    /// Hard removal; the user's historical orders keep their snapshotted
    /// names
    pub fn remove_user(&mut self, id: &str) -> AppResult<()> {
        let pos = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User".to_string()))?;
        self.users.remove(pos);
        info!(user_id = %id, "User removed");
        Ok(())
    }

    // ── Presence hints ──────────────────────────────────────────────────

    pub fn mark_online(&mut self, id: &str) -> AppResult<()> {
        let user = self.get_mut(id)?;
        user.is_online = true;
        user.last_seen = now_stamp();
        Ok(())
    }

    pub fn mark_offline(&mut self, id: &str) -> AppResult<()> {
        let user = self.get_mut(id)?;
        user.is_online = false;
        user.last_seen = now_stamp();
        Ok(())
    }

    // ── One-shot alerts ─────────────────────────────────────────────────

    /// Set (or overwrite) the user's pending alert
    pub fn send_alert(&mut self, id: &str, message: &str) -> AppResult<()> {
        self.get_mut(id)?.system_alert = Some(message.to_string());
        debug!(user_id = %id, "Alert stored");
        Ok(())
    }

    /// Clear the pending alert after the user dismisses it
    pub fn acknowledge_alert(&mut self, id: &str) -> AppResult<()> {
        self.get_mut(id)?.system_alert = None;
        Ok(())
    }

    /// Access codes resolve identity at login, so they must stay
    /// unambiguous: unique within a role, and manager codes unique
    /// against every code in the directory (in both directions, since a
    /// manager logs in with the code alone).
    fn check_code_free(&self, code: &str, role: Role, except_id: Option<&str>) -> AppResult<()> {
        let clash = self.users.iter().any(|u| {
            Some(u.id.as_str()) != except_id
                && u.code == code
                && (u.role == role || u.role == Role::Manager || role == Role::Manager)
        });
        if clash {
            return Err(AppError::conflict(format!("Access code {code}")));
        }
        Ok(())
    }
}
