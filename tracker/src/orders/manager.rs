//! OrderManager - lifecycle state machine and mutation contracts
//!
//! Every state-changing action from any role view lands here. Each
//! contract follows the same shape:
//!
//! ```text
//! locate order (missing id surfaces NotFound)
//!     ├─ merge payload fields onto the record
//!     ├─ stamp updatedAt
//!     └─ append exactly one activity log entry
//! ```
//!
//! There are no transition guards: any status may move to any other
//! status at any time, driven only by operator action. Received and
//! Rejected are "archived" purely as a read-time classification.

use shared::{
    ActivityLogEntry, LogAction, Order, OrderDraft, OrderStatus, StatusPatch, User,
    models::order::DEFAULT_CHANNEL,
};
use tracing::{debug, info};

use super::store::{OrderStore, Placement};
use crate::utils::ids;
use crate::utils::time::now_stamp;
use crate::utils::{AppError, AppResult};

/// Lifecycle engine over the canonical [`OrderStore`]
#[derive(Debug, Default)]
pub struct OrderManager {
    store: OrderStore,
}

impl OrderManager {
    pub fn new(store: OrderStore) -> Self {
        Self { store }
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self::new(OrderStore::new(orders))
    }

    /// Read view for role queries and persistence
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    // ── Creation contract ───────────────────────────────────────────────

    /// Create a new order or shallow-merge an edit onto an existing one.
    ///
    /// Without an id: mint `ORD-<millis>`, default every optional field,
    /// stamp both timestamps, status Pending, single `CREATED` log entry,
    /// prepend to the store. With an id: merge the provided fields onto
    /// the record in place, stamp `updatedAt`, append an `EDITED` entry.
    ///
    /// Numeric payload fields are validated by the caller; the engine
    /// does not re-validate.
    pub fn create_or_update(&mut self, draft: OrderDraft, actor: &User) -> AppResult<String> {
        let ts = now_stamp();

        if let Some(id) = draft.id.clone() {
            let order = self
                .store
                .find_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;

            merge_draft(order, draft);
            order.updated_at = ts.clone();
            order.logs.push(ActivityLogEntry {
                timestamp: ts,
                action: LogAction::Edited,
                user: actor.name.clone(),
                note: None,
            });
            debug!(order_id = %id, actor = %actor.name, "Order edited");
            return Ok(id);
        }

        let id = ids::order_id();
        let order = Order {
            id: id.clone(),
            customer_name: draft.customer_name.unwrap_or_default(),
            phone_number: draft.phone_number.unwrap_or_default(),
            area: draft.area.unwrap_or_default(),
            landmark: draft.landmark,
            how_heard: draft.how_heard.unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            referred_by: draft.referred_by,
            carpet_count: draft.carpet_count.unwrap_or(0),
            price: draft.price,
            notes: draft.notes,
            created_at: ts.clone(),
            delegate_id: actor.id.clone(),
            delegate_name: actor.name.clone(),
            driver_id: None,
            driver_name: None,
            brand: draft.brand.unwrap_or(shared::Brand::Mahfaza),
            status: OrderStatus::Pending,
            service_type: draft.service_type.unwrap_or_default(),
            busy_count: 0,
            no_answer_count: 0,
            blocked_count: 0,
            postponed_count: 0,
            wrong_number_count: 0,
            receipt_number: None,
            location_url: None,
            updated_at: ts.clone(),
            logs: vec![ActivityLogEntry {
                timestamp: ts,
                action: LogAction::Created,
                user: actor.name.clone(),
                note: None,
            }],
            is_urgent: false,
            urgent_note: None,
            is_separator: false,
            separator_text: None,
        };
        self.store.push_front(order);
        info!(order_id = %id, delegate = %actor.name, "Order created");
        Ok(id)
    }

    // ── Transition contract ─────────────────────────────────────────────

    /// Merge the patch, set the new status, stamp `updatedAt` and append
    /// one log entry carrying the status. Either the whole merged record
    /// replaces the old one or nothing changes.
    pub fn apply_status(
        &mut self,
        id: &str,
        status: OrderStatus,
        patch: StatusPatch,
        actor_name: &str,
    ) -> AppResult<()> {
        let order = self
            .store
            .find_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
        let ts = now_stamp();

        merge_patch(order, patch);
        bump_reason_counter(order, status);
        order.status = status;
        order.updated_at = ts.clone();
        order.logs.push(ActivityLogEntry {
            timestamp: ts,
            action: LogAction::from(status),
            user: actor_name.to_string(),
            note: None,
        });
        info!(order_id = %id, status = status.tag(), actor = %actor_name, "Status applied");
        Ok(())
    }

    /// Manager override pointing an order at a preferred driver.
    /// Re-applies `PENDING` with the driver fields patched in, so the
    /// assignment shows up in the activity trail the same way it always
    /// has in stored data.
    pub fn assign_driver(
        &mut self,
        id: &str,
        driver_id: &str,
        driver_name: &str,
        actor_name: &str,
    ) -> AppResult<()> {
        self.apply_status(
            id,
            OrderStatus::Pending,
            StatusPatch {
                driver_id: Some(driver_id.to_string()),
                driver_name: Some(driver_name.to_string()),
                ..StatusPatch::default()
            },
            actor_name,
        )
    }

    // ── Urgency ─────────────────────────────────────────────────────────

    /// Toggle the urgency pin. Logged under `URGENT_MARK` so the audit
    /// trail distinguishes it from status changes; status is untouched.
    pub fn set_urgency(
        &mut self,
        id: &str,
        urgent: bool,
        note: Option<String>,
        actor_name: &str,
    ) -> AppResult<()> {
        let order = self
            .store
            .find_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
        let ts = now_stamp();

        order.is_urgent = urgent;
        order.urgent_note = note.clone();
        order.updated_at = ts.clone();
        order.logs.push(ActivityLogEntry {
            timestamp: ts,
            action: LogAction::UrgentMark,
            user: actor_name.to_string(),
            note,
        });
        debug!(order_id = %id, urgent, "Urgency flag set");
        Ok(())
    }

    // ── Driver worklist grouping ────────────────────────────────────────

    /// Prepend a separator pseudo-record. It carries no customer data and
    /// participates only in manual ordering.
    pub fn insert_separator(&mut self, text: &str) -> String {
        let id = ids::separator_id();
        let sep = Order {
            id: id.clone(),
            customer_name: String::new(),
            phone_number: String::new(),
            area: String::new(),
            landmark: None,
            how_heard: String::new(),
            referred_by: None,
            carpet_count: 0,
            price: None,
            notes: None,
            created_at: String::new(),
            delegate_id: String::new(),
            delegate_name: String::new(),
            driver_id: None,
            driver_name: None,
            brand: shared::Brand::Mahfaza,
            status: OrderStatus::Pending,
            service_type: shared::ServiceCategory::Carpet,
            busy_count: 0,
            no_answer_count: 0,
            blocked_count: 0,
            postponed_count: 0,
            wrong_number_count: 0,
            receipt_number: None,
            location_url: None,
            updated_at: String::new(),
            logs: Vec::new(),
            is_urgent: false,
            urgent_note: None,
            is_separator: true,
            separator_text: Some(text.to_string()),
        };
        self.store.push_front(sep);
        debug!(separator_id = %id, "Separator inserted");
        id
    }

    /// Explicit manual reorder in the authoritative sequence
    pub fn move_order(
        &mut self,
        moved_id: &str,
        target_id: &str,
        placement: Placement,
    ) -> AppResult<()> {
        self.store.move_relative(moved_id, target_id, placement)
    }
}

/// Shallow-merge: only fields present in the draft overwrite
fn merge_draft(order: &mut Order, draft: OrderDraft) {
    if let Some(v) = draft.customer_name {
        order.customer_name = v;
    }
    if let Some(v) = draft.phone_number {
        order.phone_number = v;
    }
    if let Some(v) = draft.area {
        order.area = v;
    }
    if let Some(v) = draft.landmark {
        order.landmark = Some(v);
    }
    if let Some(v) = draft.how_heard {
        order.how_heard = v;
    }
    if let Some(v) = draft.referred_by {
        order.referred_by = Some(v);
    }
    if let Some(v) = draft.carpet_count {
        order.carpet_count = v;
    }
    if let Some(v) = draft.price {
        order.price = Some(v);
    }
    if let Some(v) = draft.notes {
        order.notes = Some(v);
    }
    if let Some(v) = draft.brand {
        order.brand = v;
    }
    if let Some(v) = draft.service_type {
        order.service_type = v;
    }
}

fn merge_patch(order: &mut Order, patch: StatusPatch) {
    if let Some(v) = patch.driver_id {
        order.driver_id = Some(v);
    }
    if let Some(v) = patch.driver_name {
        order.driver_name = Some(v);
    }
    if let Some(v) = patch.receipt_number {
        order.receipt_number = Some(v);
    }
    if let Some(v) = patch.carpet_count {
        order.carpet_count = v;
    }
    if let Some(v) = patch.location_url {
        order.location_url = Some(v);
    }
    if let Some(v) = patch.notes {
        order.notes = Some(v);
    }
}

/// Repeated-attempt display hints; not an enforced invariant
fn bump_reason_counter(order: &mut Order, status: OrderStatus) {
    match status {
        OrderStatus::Busy => order.busy_count += 1,
        OrderStatus::NoAnswer => order.no_answer_count += 1,
        OrderStatus::Blocked => order.blocked_count += 1,
        OrderStatus::Postponed => order.postponed_count += 1,
        OrderStatus::WrongNumber => order.wrong_number_count += 1,
        _ => {}
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::{Brand, Order, OrderStatus, Role, ServiceCategory, User};

    pub fn order(id: &str, delegate_id: &str, brand: Brand, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer_name: format!("customer-{id}"),
            phone_number: "0770000000".to_string(),
            area: "Karrada".to_string(),
            landmark: None,
            how_heard: "فيسبوك".to_string(),
            referred_by: None,
            carpet_count: 1,
            price: None,
            notes: None,
            created_at: "10:30 05/05/2025".to_string(),
            delegate_id: delegate_id.to_string(),
            delegate_name: format!("delegate-{delegate_id}"),
            driver_id: None,
            driver_name: None,
            brand,
            status,
            service_type: ServiceCategory::Carpet,
            busy_count: 0,
            no_answer_count: 0,
            blocked_count: 0,
            postponed_count: 0,
            wrong_number_count: 0,
            receipt_number: None,
            location_url: None,
            updated_at: "10:30 05/05/2025".to_string(),
            logs: Vec::new(),
            is_urgent: false,
            urgent_note: None,
            is_separator: false,
            separator_text: None,
        }
    }

    pub fn user(id: &str, name: &str, role: Role, brands: Vec<Brand>) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            role,
            code: "1001".to_string(),
            assigned_brands: brands,
            is_online: false,
            last_seen: String::new(),
            is_active: true,
            system_alert: None,
        }
    }

    pub fn delegate(id: &str, name: &str) -> User {
        user(id, name, Role::Delegate, vec![Brand::Mahfaza, Brand::Badaa])
    }

    pub fn driver(id: &str, name: &str, brands: Vec<Brand>) -> User {
        user(id, name, Role::Driver, brands)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{delegate, order};
    use super::*;
    use shared::{Brand, Price};

    #[test]
    fn test_create_defaults_and_prepends() {
        let mut mgr = OrderManager::from_orders(vec![order(
            "o1",
            "d1",
            Brand::Mahfaza,
            OrderStatus::Pending,
        )]);
        let actor = delegate("d1", "Ali");

        let id = mgr
            .create_or_update(
                OrderDraft {
                    customer_name: Some("Ali".to_string()),
                    phone_number: Some("0770123".to_string()),
                    area: Some("Karrada".to_string()),
                    carpet_count: Some(3),
                    ..OrderDraft::default()
                },
                &actor,
            )
            .unwrap();

        let created = mgr.store().find(&id).unwrap();
        assert_eq!(mgr.store().orders()[0].id, id, "newest first");
        assert_eq!(created.phone_number, "0770123");
        assert_eq!(created.carpet_count, 3);
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.how_heard, DEFAULT_CHANNEL);
        assert_eq!(created.delegate_id, "d1");
        assert_eq!(created.logs.len(), 1);
        assert_eq!(created.logs[0].action, LogAction::Created);
        assert_eq!(created.logs[0].user, "Ali");
    }

    #[test]
    fn test_minted_ids_are_unique_within_one_millisecond() {
        let mut mgr = OrderManager::default();
        let actor = delegate("d1", "Ali");
        let a = mgr.create_or_update(OrderDraft::default(), &actor).unwrap();
        let b = mgr.create_or_update(OrderDraft::default(), &actor).unwrap();
        let c = mgr.create_or_update(OrderDraft::default(), &actor).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_edit_merges_in_place_and_logs_edited() {
        let mut mgr = OrderManager::from_orders(vec![
            order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending),
            order("o2", "d1", Brand::Mahfaza, OrderStatus::Pending),
        ]);
        let actor = delegate("d1", "Ali");

        let id = mgr
            .create_or_update(
                OrderDraft {
                    id: Some("o2".to_string()),
                    area: Some("Mansour".to_string()),
                    price: Some(Price::Text("25000".to_string())),
                    ..OrderDraft::default()
                },
                &actor,
            )
            .unwrap();
        assert_eq!(id, "o2");

        // Store ordering unchanged, record merged in place
        let ids: Vec<_> = mgr.store().orders().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec!["o1", "o2"]);
        let edited = mgr.store().find("o2").unwrap();
        assert_eq!(edited.area, "Mansour");
        assert_eq!(edited.customer_name, "customer-o2", "unprovided fields kept");
        assert_eq!(edited.status, OrderStatus::Pending, "pseudo-action keeps status");
        assert_eq!(edited.logs.last().unwrap().action, LogAction::Edited);
    }

    #[test]
    fn test_edit_is_idempotent_except_log_growth() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending)]);
        let actor = delegate("d1", "Ali");
        let draft = OrderDraft {
            id: Some("o1".to_string()),
            customer_name: Some("Hasan".to_string()),
            carpet_count: Some(5),
            ..OrderDraft::default()
        };

        mgr.create_or_update(draft.clone(), &actor).unwrap();
        let first = mgr.store().find("o1").unwrap().clone();
        mgr.create_or_update(draft, &actor).unwrap();
        let second = mgr.store().find("o1").unwrap().clone();

        assert_eq!(second.logs.len(), first.logs.len() + 1);
        let mut a = first;
        let mut b = second;
        a.logs.clear();
        b.logs.clear();
        b.updated_at = a.updated_at.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_id_surfaces_not_found() {
        let mut mgr = OrderManager::default();
        let actor = delegate("d1", "Ali");
        let err = mgr
            .create_or_update(
                OrderDraft {
                    id: Some("ORD-missing".to_string()),
                    ..OrderDraft::default()
                },
                &actor,
            )
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = mgr
            .apply_status("ORD-missing", OrderStatus::Busy, StatusPatch::default(), "Arshad")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_apply_status_appends_exactly_one_entry() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending)]);

        mgr.apply_status(
            "o1",
            OrderStatus::Received,
            StatusPatch {
                driver_id: Some("s1".to_string()),
                driver_name: Some("Arshad".to_string()),
                receipt_number: Some("1042".to_string()),
                carpet_count: Some(4),
                ..StatusPatch::default()
            },
            "Arshad",
        )
        .unwrap();

        let o = mgr.store().find("o1").unwrap();
        assert_eq!(o.status, OrderStatus::Received);
        assert_eq!(o.receipt_number.as_deref(), Some("1042"));
        assert_eq!(o.carpet_count, 4);
        assert_eq!(o.logs.len(), 1);
        assert_eq!(o.logs[0].action, LogAction::Received);
        assert_eq!(o.logs[0].user, "Arshad");
    }

    #[test]
    fn test_no_guard_blocks_reopening_archived_orders() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Received)]);
        mgr.apply_status("o1", OrderStatus::Pending, StatusPatch::default(), "Manager")
            .unwrap();
        assert_eq!(mgr.store().find("o1").unwrap().status, OrderStatus::Pending);
    }

    #[test]
    fn test_log_length_tracks_mutation_count() {
        let mut mgr = OrderManager::default();
        let actor = delegate("d1", "Ali");
        let id = mgr.create_or_update(OrderDraft::default(), &actor).unwrap();

        mgr.apply_status(&id, OrderStatus::Busy, StatusPatch::default(), "Arshad")
            .unwrap();
        mgr.apply_status(&id, OrderStatus::NoAnswer, StatusPatch::default(), "Arshad")
            .unwrap();
        mgr.set_urgency(&id, true, Some("today".to_string()), "Manager")
            .unwrap();
        mgr.apply_status(&id, OrderStatus::Received, StatusPatch::default(), "Arshad")
            .unwrap();

        let o = mgr.store().find(&id).unwrap();
        assert_eq!(o.logs.len(), 5, "one creation + four mutations");
        assert_eq!(o.logs.last().unwrap().action.as_status(), Some(o.status));
    }

    #[test]
    fn test_reason_counters_bump_on_matching_status() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending)]);
        mgr.apply_status("o1", OrderStatus::Busy, StatusPatch::default(), "Arshad")
            .unwrap();
        mgr.apply_status("o1", OrderStatus::Busy, StatusPatch::default(), "Arshad")
            .unwrap();
        mgr.apply_status("o1", OrderStatus::WrongNumber, StatusPatch::default(), "Arshad")
            .unwrap();
        let o = mgr.store().find("o1").unwrap();
        assert_eq!(o.busy_count, 2);
        assert_eq!(o.wrong_number_count, 1);
        assert_eq!(o.no_answer_count, 0);
    }

    #[test]
    fn test_urgency_logs_pseudo_action_with_note() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Busy)]);
        mgr.set_urgency("o1", true, Some("VIP".to_string()), "Manager")
            .unwrap();
        let o = mgr.store().find("o1").unwrap();
        assert!(o.is_urgent);
        assert_eq!(o.status, OrderStatus::Busy, "urgency never alters status");
        let last = o.logs.last().unwrap();
        assert_eq!(last.action, LogAction::UrgentMark);
        assert_eq!(last.note.as_deref(), Some("VIP"));

        mgr.set_urgency("o1", false, None, "Manager").unwrap();
        let o = mgr.store().find("o1").unwrap();
        assert!(!o.is_urgent);
        assert_eq!(o.urgent_note, None);
    }

    #[test]
    fn test_assign_driver_reapplies_pending_with_driver_patch() {
        let mut mgr =
            OrderManager::from_orders(vec![order("o1", "d1", Brand::Mahfaza, OrderStatus::Busy)]);
        mgr.assign_driver("o1", "s2", "Hamza", "Manager").unwrap();
        let o = mgr.store().find("o1").unwrap();
        assert_eq!(o.driver_id.as_deref(), Some("s2"));
        assert_eq!(o.driver_name.as_deref(), Some("Hamza"));
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.logs.last().unwrap().action, LogAction::Pending);
    }

    #[test]
    fn test_separator_carries_no_customer_data() {
        let mut mgr = OrderManager::default();
        let id = mgr.insert_separator("afternoon run");
        let sep = mgr.store().find(&id).unwrap();
        assert!(sep.is_separator);
        assert_eq!(sep.separator_text.as_deref(), Some("afternoon run"));
        assert!(sep.customer_name.is_empty());
        assert!(sep.created_at.is_empty());
        assert!(sep.logs.is_empty());
        assert_eq!(mgr.store().orders()[0].id, id, "prepended");
    }
}
