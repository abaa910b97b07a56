//! User Model

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Delegate,
    Driver,
    Manager,
}

/// Company brand a staff member or order belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Brand {
    #[serde(rename = "MAHFAZA")]
    Mahfaza,
    #[serde(rename = "BADA_A")]
    Badaa,
}

impl Brand {
    /// Stable wire tag, also used as a deterministic sort key
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Mahfaza => "MAHFAZA",
            Self::Badaa => "BADA_A",
        }
    }
}

/// Identity record
///
/// `code` is the numeric access code checked at login. It must be unique
/// within a role (login resolves identity + code) and globally unique for
/// managers (manager login matches the code alone); the directory enforces
/// this on create and code reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub code: String,
    /// Brand memberships (non-empty)
    #[serde(rename = "assignedCompanies")]
    pub assigned_brands: Vec<Brand>,
    /// Presence hints persisted by the UI, not interpreted by the core
    pub is_online: bool,
    pub last_seen: String,
    pub is_active: bool,
    /// At most one pending broadcast alert; cleared on acknowledgment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_alert: Option<String>,
}

impl User {
    pub fn works_for(&self, brand: Brand) -> bool {
        self.assigned_brands.contains(&brand)
    }
}

/// Create user payload (manager action)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub code: String,
    pub role: Role,
    #[serde(rename = "assignedCompanies")]
    pub assigned_brands: Vec<Brand>,
}

/// Update user payload (manager action)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub code: Option<String>,
    #[serde(rename = "assignedCompanies")]
    pub assigned_brands: Option<Vec<Brand>>,
    pub is_active: Option<bool>,
}
