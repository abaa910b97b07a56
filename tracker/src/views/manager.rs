//! Manager view - full visibility, team management, broadcast alerts
//!
//! The manager sees every real order across both brands, can edit any
//! field inline, pin urgent orders, point an order at a preferred
//! driver and run the directory. Analytics use the manager formula set,
//! which is deliberately not the field one.

use shared::{
    Brand, ManagerAnalytics, Order, OrderDraft, Role, User, UserCreate, UserUpdate,
};

use crate::core::AppState;
use crate::orders::store::{sort_view, split_archived, SortDir, SortKey};
use crate::reports::{self, Period};
use crate::utils::digits::to_ascii_digits;
use crate::utils::validation::validate_required_text;
use crate::utils::{AppError, AppResult};

use super::require_role;

/// Urgent note stored when the manager pins without writing one
const DEFAULT_URGENT_NOTE: &str = "عاجل";

/// Every real order, split into (active, archived) and sorted
pub fn order_lists<'a>(
    state: &'a AppState,
    query: &str,
    key: SortKey,
    dir: SortDir,
) -> AppResult<(Vec<&'a Order>, Vec<&'a Order>)> {
    require_role(state, Role::Manager)?;
    let query = to_ascii_digits(query);
    let (mut active, archived) = split_archived(state.orders().store().all_orders(&query));
    sort_view(&mut active, key, dir);
    Ok((active, archived))
}

/// Pin or unpin an order. Pinning with no note stores the default one.
pub fn toggle_urgent(
    state: &mut AppState,
    order_id: &str,
    urgent: bool,
    note: Option<String>,
) -> AppResult<()> {
    let manager = require_role(state, Role::Manager)?;
    let note = if urgent {
        Some(note.unwrap_or_else(|| DEFAULT_URGENT_NOTE.to_string()))
    } else {
        None
    };
    state.mutate_orders(|orders| orders.set_urgency(order_id, urgent, note, &manager.name))
}

/// Inline edit of any order field
pub fn quick_edit(state: &mut AppState, order_id: &str, mut draft: OrderDraft) -> AppResult<()> {
    let manager = require_role(state, Role::Manager)?;
    draft.id = Some(order_id.to_string());
    state
        .mutate_orders(|orders| orders.create_or_update(draft, &manager))
        .map(|_| ())
}

/// Point an order at a preferred driver, resolved by exact name
pub fn assign_driver(state: &mut AppState, order_id: &str, driver_name: &str) -> AppResult<()> {
    let manager = require_role(state, Role::Manager)?;
    let driver = state
        .directory()
        .users()
        .iter()
        .find(|u| u.role == Role::Driver && u.name == driver_name)
        .ok_or_else(|| AppError::not_found(format!("Driver {driver_name}")))?
        .clone();
    state.mutate_orders(|orders| {
        orders.assign_driver(order_id, &driver.id, &driver.name, &manager.name)
    })
}

// ── Team management ─────────────────────────────────────────────────────

pub fn team(state: &AppState) -> AppResult<Vec<User>> {
    require_role(state, Role::Manager)?;
    Ok(state.directory().users().to_vec())
}

pub fn add_member(state: &mut AppState, mut payload: UserCreate) -> AppResult<String> {
    require_role(state, Role::Manager)?;
    payload.code = to_ascii_digits(&payload.code);
    state.mutate_directory(|dir| dir.create_user(payload))
}

pub fn update_member(state: &mut AppState, user_id: &str, mut update: UserUpdate) -> AppResult<()> {
    require_role(state, Role::Manager)?;
    update.code = update.code.map(|c| to_ascii_digits(&c));
    state.mutate_directory(|dir| dir.update_user(user_id, update))
}

pub fn remove_member(state: &mut AppState, user_id: &str) -> AppResult<()> {
    require_role(state, Role::Manager)?;
    state.mutate_directory(|dir| dir.remove_user(user_id))
}

// ── Alerts ──────────────────────────────────────────────────────────────

/// Store an alert on one user; overwrites any pending one
pub fn send_alert(state: &mut AppState, user_id: &str, message: &str) -> AppResult<()> {
    require_role(state, Role::Manager)?;
    validate_required_text(message, "message")?;
    state.mutate_directory(|dir| dir.send_alert(user_id, message))
}

/// Store the same alert on every staff member except the sender
pub fn broadcast_alert(state: &mut AppState, message: &str) -> AppResult<()> {
    let manager = require_role(state, Role::Manager)?;
    validate_required_text(message, "message")?;
    let targets: Vec<String> = state
        .directory()
        .users()
        .iter()
        .filter(|u| u.id != manager.id)
        .map(|u| u.id.clone())
        .collect();
    state.mutate_directory(|dir| {
        for id in &targets {
            dir.send_alert(id, message)?;
        }
        Ok(())
    })
}

// ── Analytics ───────────────────────────────────────────────────────────

/// Manager analytics over a selectable staff subset; empty means
/// everyone
pub fn analytics(
    state: &AppState,
    staff_ids: &[String],
    period: Period,
) -> AppResult<ManagerAnalytics> {
    require_role(state, Role::Manager)?;
    let all = state.orders().store().all_orders("");
    Ok(reports::manager_analytics(&all, staff_ids, period))
}

/// Brand filter helper for the manager lists
pub fn filter_brand<'a>(list: Vec<&'a Order>, brand: Brand) -> Vec<&'a Order> {
    list.into_iter().filter(|o| o.brand == brand).collect()
}
