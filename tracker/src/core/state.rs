//! Application state shell
//!
//! Owns the three live components (directory, order manager, session
//! snapshot) plus their storage. Every mutation goes through one of the
//! `mutate_*` wrappers, which rewrite the backing JSON record after the
//! change, so memory and disk never drift for longer than one action.

use shared::{Role, User};
use tracing::{info, warn};

use crate::directory::UserDirectory;
use crate::orders::OrderManager;
use crate::session::SessionStorage;
use crate::utils::{AppError, AppResult};

use super::config::Config;

pub struct AppState {
    config: Config,
    storage: SessionStorage,
    directory: UserDirectory,
    orders: OrderManager,
    current: Option<User>,
}

impl AppState {
    /// Load the persisted state, seeding a bootstrap manager on first
    /// run. A persisted current-user id that no longer resolves against
    /// the directory falls back silently to logged-out.
    pub fn initialize(config: Config) -> AppResult<Self> {
        let storage = SessionStorage::open(&config.work_dir)?;

        let directory = match storage.load_users().map_err(AppError::trace)? {
            Some(users) => UserDirectory::new(users),
            None => {
                let directory = UserDirectory::bootstrap(&config.default_manager_code);
                storage.save_users(directory.users())?;
                directory
            }
        };

        let orders = OrderManager::from_orders(
            storage.load_orders().map_err(AppError::trace)?.unwrap_or_default(),
        );

        let current = match storage.load_current_user().map_err(AppError::trace)? {
            Some(snapshot) => match directory.get(&snapshot.id) {
                // Refresh the snapshot so edits from a previous session show
                Some(live) => Some(live.clone()),
                None => {
                    warn!(user_id = %snapshot.id, "Stale session, falling back to logged out");
                    storage.clear_current_user()?;
                    None
                }
            },
            None => None,
        };

        info!(
            users = directory.users().len(),
            orders = orders.store().len(),
            "State initialized"
        );
        Ok(Self {
            config,
            storage,
            directory,
            orders,
            current,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn orders(&self) -> &OrderManager {
        &self.orders
    }

    // ── Session ─────────────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The role view to mount, when logged in
    pub fn current_role(&self) -> Option<Role> {
        self.current.as_ref().map(|u| u.role)
    }

    /// Login is an input boundary: the access code is digit-normalized
    /// before matching
    pub fn login(&mut self, role: Role, identity: Option<&str>, code: &str) -> AppResult<User> {
        let code = crate::utils::digits::to_ascii_digits(code);
        let user = self.directory.authenticate(role, identity, &code)?.clone();
        self.directory.mark_online(&user.id)?;
        self.storage.save_users(self.directory.users())?;
        self.storage.save_current_user(&user)?;
        self.current = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) -> AppResult<()> {
        if let Some(user) = self.current.take() {
            // The user may have been removed by a manager mid-session
            if self.directory.get(&user.id).is_some() {
                self.directory.mark_offline(&user.id)?;
                self.storage.save_users(self.directory.users())?;
            }
            info!(user_id = %user.id, "Logged out");
        }
        self.storage.clear_current_user()?;
        Ok(())
    }

    // ── Persisting mutation wrappers ────────────────────────────────────

    /// Run an order mutation and rewrite orders.json
    pub fn mutate_orders<T>(
        &mut self,
        f: impl FnOnce(&mut OrderManager) -> AppResult<T>,
    ) -> AppResult<T> {
        let out = f(&mut self.orders)?;
        self.storage
            .save_orders(self.orders.store().orders())
            .map_err(AppError::trace)?;
        Ok(out)
    }

    /// Run a directory mutation, rewrite users.json and re-sync the
    /// session snapshot (the mutation may have touched the logged-in
    /// user, or removed them)
    pub fn mutate_directory<T>(
        &mut self,
        f: impl FnOnce(&mut UserDirectory) -> AppResult<T>,
    ) -> AppResult<T> {
        let out = f(&mut self.directory)?;
        self.storage
            .save_users(self.directory.users())
            .map_err(AppError::trace)?;
        self.sync_session()?;
        Ok(out)
    }

    fn sync_session(&mut self) -> AppResult<()> {
        if let Some(current) = &self.current {
            match self.directory.get(&current.id) {
                Some(live) => {
                    let live = live.clone();
                    self.storage.save_current_user(&live)?;
                    self.current = Some(live);
                }
                None => {
                    warn!(user_id = %current.id, "Logged-in user removed from directory");
                    self.storage.clear_current_user()?;
                    self.current = None;
                }
            }
        }
        Ok(())
    }
}
