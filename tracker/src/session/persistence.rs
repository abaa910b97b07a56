//! JSON round-tripping of the three persisted records
//!
//! The files are direct structural serializations of the in-memory
//! model, no schema versioning. A missing file reads as `None`; a
//! malformed file is a `Serialization` error surfaced to the caller.

use shared::{Order, User};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::AppResult;

const USERS_FILE: &str = "users.json";
const ORDERS_FILE: &str = "orders.json";
const CURRENT_USER_FILE: &str = "current_user.json";

#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Open (and create if needed) the storage directory
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Session storage opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── User directory ──────────────────────────────────────────────────

    pub fn load_users(&self) -> AppResult<Option<Vec<User>>> {
        self.read_record(USERS_FILE)
    }

    pub fn save_users(&self, users: &[User]) -> AppResult<()> {
        self.write_record(USERS_FILE, &users)
    }

    // ── Order list ──────────────────────────────────────────────────────

    pub fn load_orders(&self) -> AppResult<Option<Vec<Order>>> {
        self.read_record(ORDERS_FILE)
    }

    pub fn save_orders(&self, orders: &[Order]) -> AppResult<()> {
        self.write_record(ORDERS_FILE, &orders)
    }

    // ── Current-user snapshot ───────────────────────────────────────────

    pub fn load_current_user(&self) -> AppResult<Option<User>> {
        self.read_record(CURRENT_USER_FILE)
    }

    pub fn save_current_user(&self, user: &User) -> AppResult<()> {
        self.write_record(CURRENT_USER_FILE, user)
    }

    /// Logged-out state is the absence of the snapshot file
    pub fn clear_current_user(&self) -> AppResult<()> {
        let path = self.dir.join(CURRENT_USER_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn read_record<T: serde::de::DeserializeOwned>(&self, name: &str) -> AppResult<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_record<T: serde::Serialize>(&self, name: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(name), raw)?;
        Ok(())
    }
}
