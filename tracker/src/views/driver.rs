//! Driver view - brand-scoped worklist and order actions
//!
//! The worklist is the driver's working queue: active orders of their
//! brands in sequence order, separators included, with search, sort and
//! explicit manual moves. Submitting an action is the only place a
//! receipt number is enforced; the engine itself accepts any patch.

use shared::{Order, OrderStatus, ProgressStats, Role, StatusPatch};

use crate::core::AppState;
use crate::orders::store::{sort_view, SortDir, SortKey};
use crate::orders::Placement;
use crate::reports::{self, Period};
use crate::utils::digits::{digits_only, to_ascii_digits};
use crate::utils::links::maps_link;
use crate::utils::{AppError, AppResult};

use super::require_role;

/// One status action submitted from an order card
#[derive(Debug, Clone, Default)]
pub struct DriverActionForm {
    pub status: OrderStatus,
    /// Raw receipt input; required (after normalization) for `Received`
    pub receipt_number: String,
    /// Raw corrected count; empty keeps the stored count
    pub carpet_count: String,
    /// Free-text remark appended to the order notes
    pub note: String,
    /// Captured device location, `(latitude, longitude)`
    pub location: Option<(f64, f64)>,
}

/// Active worklist for the logged-in driver
pub fn worklist<'a>(
    state: &'a AppState,
    query: &str,
    key: SortKey,
    dir: SortDir,
) -> AppResult<Vec<&'a Order>> {
    let driver = require_role(state, Role::Driver)?;
    let query = to_ascii_digits(query);
    let mut list = state
        .orders()
        .store()
        .driver_worklist(&driver.assigned_brands, &query);
    sort_view(&mut list, key, dir);
    Ok(list)
}

/// Received/rejected orders of the driver's brands
pub fn archive<'a>(state: &'a AppState) -> AppResult<Vec<&'a Order>> {
    let driver = require_role(state, Role::Driver)?;
    Ok(state.orders().store().driver_archive(&driver.assigned_brands))
}

/// Orders still waiting for an action, separators not counted
pub fn remaining_count(state: &AppState) -> AppResult<usize> {
    let driver = require_role(state, Role::Driver)?;
    Ok(state
        .orders()
        .store()
        .driver_worklist(&driver.assigned_brands, "")
        .iter()
        .filter(|o| !o.is_separator)
        .count())
}

/// Apply a status action to one order. `Received` without a receipt
/// number is rejected here and never reaches the engine.
pub fn submit_action(state: &mut AppState, order_id: &str, form: DriverActionForm) -> AppResult<()> {
    let driver = require_role(state, Role::Driver)?;

    let receipt = digits_only(&form.receipt_number);
    if form.status == OrderStatus::Received && receipt.is_empty() {
        return Err(AppError::validation("Receipt number is required"));
    }

    let carpet_count = {
        let corrected = digits_only(&form.carpet_count);
        if corrected.is_empty() {
            None
        } else {
            corrected.parse::<u32>().ok()
        }
    };

    let note = form.note.trim().to_string();
    let notes = if note.is_empty() {
        None
    } else {
        let existing = state
            .orders()
            .store()
            .find(order_id)
            .and_then(|o| o.notes.clone());
        Some(match existing {
            Some(prior) => format!("{prior} | ملاحظة السائق: {note}"),
            None => format!("ملاحظة السائق: {note}"),
        })
    };

    let patch = StatusPatch {
        driver_id: Some(driver.id.clone()),
        driver_name: Some(driver.name.clone()),
        receipt_number: if receipt.is_empty() { None } else { Some(receipt) },
        carpet_count,
        location_url: form.location.map(|(lat, lon)| maps_link(lat, lon)),
        notes,
    };
    state.mutate_orders(|orders| orders.apply_status(order_id, form.status, patch, &driver.name))
}

/// Insert a worklist group separator
pub fn add_separator(state: &mut AppState, text: &str) -> AppResult<String> {
    require_role(state, Role::Driver)?;
    state.mutate_orders(|orders| Ok(orders.insert_separator(text)))
}

/// Move an order (or separator) before/after another in the
/// authoritative sequence
pub fn move_order(
    state: &mut AppState,
    moved_id: &str,
    target_id: &str,
    placement: Placement,
) -> AppResult<()> {
    require_role(state, Role::Driver)?;
    state.mutate_orders(|orders| orders.move_order(moved_id, target_id, placement))
}

/// Field progress over the orders this driver has acted on
pub fn progress(state: &AppState, period: Period) -> AppResult<ProgressStats> {
    let driver = require_role(state, Role::Driver)?;
    let mine: Vec<&Order> = state
        .orders()
        .store()
        .orders()
        .iter()
        .filter(|o| !o.is_separator && o.driver_id.as_deref() == Some(driver.id.as_str()))
        .collect();
    Ok(reports::field_progress(&mine, period))
}
