//! Report Model
//!
//! Pure read-side projections over the order list. All derived figures
//! are synthetic operational estimates, not measured facts; the delegate/
//! driver and manager views intentionally use different constants and the
//! two formula sets must not be unified.

use serde::{Deserialize, Serialize};

/// Progress report for a delegate or driver (self scope)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// In-scope, in-period orders with status RECEIVED
    pub received: usize,
    /// In-scope, in-period orders with status REJECTED
    pub rejected: usize,
    /// All in-scope, in-period orders regardless of status
    pub added: usize,
    /// `received * 4.2`
    pub distance_km: f64,
    /// `received * 0.75 + rejected * 0.2`
    pub labor_hours: f64,
}

/// Manager analytics over a selectable staff subset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerAnalytics {
    pub received: usize,
    /// Orders not yet archived
    pub active: usize,
    /// `received * 4.5`, deliberately not the field-view constant
    pub distance_km: f64,
    /// `floor(received * 0.7)`
    pub labor_hours: u64,
}
