//! Record id minting
//!
//! Ids embed the creation wall-clock in unix milliseconds. The counter
//! keeps minted values strictly increasing so two records minted inside
//! the same millisecond still get distinct ids.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

pub fn next_unique_millis() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let prev = LAST_ID_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(prev + 1)
}

/// `ORD-<millis>` order id
pub fn order_id() -> String {
    format!("ORD-{}", next_unique_millis())
}

/// `SEP-<millis>` separator pseudo-record id
pub fn separator_id() -> String {
    format!("SEP-{}", next_unique_millis())
}

/// `u-<millis>` staff member id
pub fn user_id() -> String {
    format!("u-{}", next_unique_millis())
}
