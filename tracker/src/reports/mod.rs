//! Reporting - period-bounded read-side projections
//!
//! All derived figures are synthetic operational estimates. The field
//! (delegate/driver) view and the manager view use different constants
//! and different hour formulas; the two sets are independent and stay
//! that way, since unifying them would change every historical figure.
//!
//! Period membership re-parses the `DD/MM/YYYY` substring of `createdAt`
//! into a real date. Separator pseudo-records are excluded before any
//! period check, so their empty stamps never leak into a window.

use chrono::NaiveDate;
use shared::{ManagerAnalytics, Order, OrderStatus, ProgressStats};

use crate::utils::time::{days_since, stamp_date, today_token};

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    /// Rolling 7 days including today
    Week,
    /// Rolling 30 days including today
    Month,
    /// Inclusive date range; an unset bound is unbounded
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl Period {
    pub fn contains(&self, created_at: &str) -> bool {
        match self {
            Period::Today => created_at.contains(&today_token()),
            Period::Week => days_since(created_at) < 7,
            Period::Month => days_since(created_at) < 30,
            Period::Custom { from, to } => match stamp_date(created_at) {
                Some(date) => {
                    from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
                }
                None => false,
            },
        }
    }
}

/// Staff scope for manager analytics: an order is in scope when its
/// delegate or assigned driver is one of the selected staff members.
/// An empty selection means everyone.
pub fn in_staff_scope(order: &Order, staff_ids: &[String]) -> bool {
    if staff_ids.is_empty() {
        return true;
    }
    staff_ids.iter().any(|id| {
        order.delegate_id == *id || order.driver_id.as_deref() == Some(id.as_str())
    })
}

fn in_period<'a>(orders: &'a [&'a Order], period: Period) -> impl Iterator<Item = &'a Order> {
    orders
        .iter()
        .copied()
        .filter(|o| !o.is_separator)
        .filter(move |o| period.contains(&o.created_at))
}

/// Field formula set: km = received * 4.2, hours = received * 0.75 +
/// rejected * 0.2
pub fn field_progress(orders: &[&Order], period: Period) -> ProgressStats {
    let mut received = 0usize;
    let mut rejected = 0usize;
    let mut added = 0usize;
    for order in in_period(orders, period) {
        added += 1;
        match order.status {
            OrderStatus::Received => received += 1,
            OrderStatus::Rejected => rejected += 1,
            _ => {}
        }
    }
    ProgressStats {
        received,
        rejected,
        added,
        distance_km: received as f64 * 4.2,
        labor_hours: received as f64 * 0.75 + rejected as f64 * 0.2,
    }
}

/// Manager formula set: km = received * 4.5, hours = floor(received *
/// 0.7). Not reconciled with the field set.
pub fn manager_analytics(
    orders: &[&Order],
    staff_ids: &[String],
    period: Period,
) -> ManagerAnalytics {
    let mut received = 0usize;
    let mut active = 0usize;
    for order in in_period(orders, period).filter(|o| in_staff_scope(o, staff_ids)) {
        if order.status == OrderStatus::Received {
            received += 1;
        }
        if !order.is_archived() {
            active += 1;
        }
    }
    ManagerAnalytics {
        received,
        active,
        distance_km: received as f64 * 4.5,
        labor_hours: (received as f64 * 0.7).floor() as u64,
    }
}
