//! Order Model

use serde::{Deserialize, Serialize};

use super::user::Brand;

/// Default acquisition channel stamped on orders that omit one
pub const DEFAULT_CHANNEL: &str = "فيسبوك";

/// Order status
///
/// `Received` and `Rejected` classify as archived in every view, but no
/// guard forbids transitions out of them: any status may move to any
/// other status at any time, driven only by operator action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Received,
    Rejected,
    Busy,
    Blocked,
    NoAnswer,
    WrongNumber,
    Postponed,
}

impl OrderStatus {
    /// Archival is a pure function of status, recomputed on every read
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Received | Self::Rejected)
    }

    /// Stable tag used for lexicographic status sorting
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Received => "RECEIVED",
            Self::Rejected => "REJECTED",
            Self::Busy => "BUSY",
            Self::Blocked => "BLOCKED",
            Self::NoAnswer => "NO_ANSWER",
            Self::WrongNumber => "WRONG_NUMBER",
            Self::Postponed => "POSTPONED",
        }
    }
}

/// Service category of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    #[default]
    Carpet,
    Sofa,
    House,
    Car,
    Laundry,
}

/// Activity log action tag: a status value or a pseudo-action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    Pending,
    Received,
    Rejected,
    Busy,
    Blocked,
    NoAnswer,
    WrongNumber,
    Postponed,
    Created,
    Edited,
    LocationAdded,
    DriverAssigned,
    UrgentMark,
}

impl LogAction {
    /// The status this entry recorded, if it was a status change
    pub fn as_status(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(OrderStatus::Pending),
            Self::Received => Some(OrderStatus::Received),
            Self::Rejected => Some(OrderStatus::Rejected),
            Self::Busy => Some(OrderStatus::Busy),
            Self::Blocked => Some(OrderStatus::Blocked),
            Self::NoAnswer => Some(OrderStatus::NoAnswer),
            Self::WrongNumber => Some(OrderStatus::WrongNumber),
            Self::Postponed => Some(OrderStatus::Postponed),
            _ => None,
        }
    }
}

impl From<OrderStatus> for LogAction {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Received => Self::Received,
            OrderStatus::Rejected => Self::Rejected,
            OrderStatus::Busy => Self::Busy,
            OrderStatus::Blocked => Self::Blocked,
            OrderStatus::NoAnswer => Self::NoAnswer,
            OrderStatus::WrongNumber => Self::WrongNumber,
            OrderStatus::Postponed => Self::Postponed,
        }
    }
}

/// Append-only activity log entry, immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLogEntry {
    /// `HH:mm DD/MM/YYYY` stamp of the mutation
    pub timestamp: String,
    pub action: LogAction,
    /// Acting user's display name
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Agreed price: free-form for non-carpet services, so either a number
/// or a text value survives round-tripping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

/// Order entity
///
/// A separator record (`is_separator`) carries no customer data and only
/// participates in manual ordering; every status filter, search filter
/// and report aggregation must skip it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    /// Digits only, normalized at the input boundary
    pub phone_number: String,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Acquisition channel tag
    pub how_heard: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    /// Meaningful only for the carpet service category
    pub carpet_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `HH:mm DD/MM/YYYY`
    pub created_at: String,
    pub delegate_id: String,
    /// Denormalized for display
    pub delegate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(rename = "company")]
    pub brand: Brand,
    pub status: OrderStatus,
    pub service_type: ServiceCategory,
    // Rejection-reason counters: display hints, not enforced invariants
    pub busy_count: u32,
    pub no_answer_count: u32,
    pub blocked_count: u32,
    pub postponed_count: u32,
    pub wrong_number_count: u32,
    /// Set only on successful receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    /// Maps deep link captured by the geolocation collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    pub updated_at: String,
    /// Append-only; display order is log order
    pub logs: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent_note: Option<String>,
    #[serde(default)]
    pub is_separator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_text: Option<String>,
}

impl Order {
    pub fn is_archived(&self) -> bool {
        self.status.is_archived()
    }
}

/// Create-or-update payload built by a role view
///
/// With no `id` the engine mints a new order; with an `id` it
/// shallow-merges these fields onto the existing record. Numeric fields
/// are validated by the caller before this payload is built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub id: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub area: Option<String>,
    pub landmark: Option<String>,
    pub how_heard: Option<String>,
    pub referred_by: Option<String>,
    pub carpet_count: Option<u32>,
    pub price: Option<Price>,
    pub notes: Option<String>,
    #[serde(rename = "company")]
    pub brand: Option<Brand>,
    pub service_type: Option<ServiceCategory>,
}

/// Additional fields merged during a status transition
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    pub receipt_number: Option<String>,
    pub carpet_count: Option<u32>,
    pub location_url: Option<String>,
    pub notes: Option<String>,
}
