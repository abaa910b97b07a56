//! Order Store - canonical order sequence and role-scoped queries
//!
//! The store owns the full ordered list of order records, including the
//! separator pseudo-records a driver inserts to group the worklist.
//! Queries borrow; all writes go through [`super::OrderManager`].
//!
//! Sequence position is meaningful: newly created orders are prepended
//! (newest first) and the driver's manual ordering is expressed as moves
//! within this authoritative list, never as a replacement by a filtered
//! subset (which would silently drop invisible records).

use shared::{Brand, Order};
use std::cmp::Ordering;

use crate::utils::time::stamp_cmp;
use crate::utils::{AppError, AppResult};

/// Sort key for active order lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Insertion / drag order
    #[default]
    Manual,
    /// Creation stamp, lexicographic (see `stamp_cmp`)
    CreatedAt,
    /// Last-update stamp, lexicographic
    UpdatedAt,
    /// Status tag, lexicographic - arbitrary but deterministic
    Status,
    Area,
    Brand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

/// Where to drop a moved element relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Canonical order collection
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Full sequence, used by the persistence shell for serialization
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    pub(crate) fn push_front(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders.iter().position(|o| o.id == id)
    }

    // ── Role-scoped queries ─────────────────────────────────────────────

    /// Orders authored by one delegate. Separators never show here.
    pub fn delegate_orders(&self, delegate_id: &str, query: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| !o.is_separator && o.delegate_id == delegate_id)
            .filter(|o| matches_search(o, query))
            .collect()
    }

    /// Driver worklist: active orders of the driver's brands, in sequence
    /// order, with separators passed through untouched by every filter.
    pub fn driver_worklist(&self, brands: &[Brand], query: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.is_separator || brands.contains(&o.brand))
            .filter(|o| o.is_separator || !o.is_archived())
            .filter(|o| o.is_separator || matches_search(o, query))
            .collect()
    }

    /// Driver archive: received/rejected orders of the driver's brands
    pub fn driver_archive(&self, brands: &[Brand]) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| !o.is_separator && o.is_archived() && brands.contains(&o.brand))
            .collect()
    }

    /// Manager scope: every real order
    pub fn all_orders(&self, query: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| !o.is_separator)
            .filter(|o| matches_search(o, query))
            .collect()
    }

    // ── Manual reordering ───────────────────────────────────────────────

    /// Move one element before/after another in the authoritative
    /// sequence. Remove + reinsert, so all other elements - including
    /// ones invisible to the caller's view - keep their relative order.
    pub fn move_relative(
        &mut self,
        moved_id: &str,
        target_id: &str,
        placement: Placement,
    ) -> AppResult<()> {
        if moved_id == target_id {
            return Ok(());
        }
        let moved_idx = self
            .position(moved_id)
            .ok_or_else(|| AppError::not_found(format!("Order {moved_id}")))?;
        if self.position(target_id).is_none() {
            return Err(AppError::not_found(format!("Order {target_id}")));
        }

        let moved = self.orders.remove(moved_idx);
        // Recompute after removal; the target cannot have vanished
        let target_idx = self
            .position(target_id)
            .expect("target still present after removing a different element");
        let insert_at = match placement {
            Placement::Before => target_idx,
            Placement::After => target_idx + 1,
        };
        self.orders.insert(insert_at, moved);
        Ok(())
    }
}

/// Case-sensitive substring match over customer name, phone and area.
/// The query must already be digit-normalized at the input boundary.
pub fn matches_search(order: &Order, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    order.customer_name.contains(query)
        || order.phone_number.contains(query)
        || order.area.contains(query)
}

/// Partition a view into (active, archived) by status, preserving order
pub fn split_archived<'a>(list: Vec<&'a Order>) -> (Vec<&'a Order>, Vec<&'a Order>) {
    list.into_iter().partition(|o| !o.is_archived())
}

/// Sort an active view in place. Manual keeps sequence order. Urgent
/// orders are then pinned first by a stable secondary pass, whatever the
/// chosen key.
pub fn sort_view(list: &mut [&Order], key: SortKey, dir: SortDir) {
    if key != SortKey::Manual {
        list.sort_by(|a, b| {
            let ord = match key {
                SortKey::CreatedAt => stamp_cmp(&a.created_at, &b.created_at),
                SortKey::UpdatedAt => stamp_cmp(&a.updated_at, &b.updated_at),
                SortKey::Status => a.status.tag().cmp(b.status.tag()),
                SortKey::Area => a.area.cmp(&b.area),
                SortKey::Brand => a.brand.tag().cmp(b.brand.tag()),
                SortKey::Manual => Ordering::Equal,
            };
            match dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }
    list.sort_by_key(|o| !o.is_urgent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::manager::test_support::order;
    use shared::OrderStatus;

    fn store() -> OrderStore {
        OrderStore::new(vec![
            order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending),
            order("o2", "d2", Brand::Badaa, OrderStatus::Received),
            order("o3", "d1", Brand::Badaa, OrderStatus::Busy),
            order("o4", "d2", Brand::Mahfaza, OrderStatus::Rejected),
        ])
    }

    #[test]
    fn test_delegate_sees_only_own_orders() {
        let store = store();
        let mine: Vec<_> = store
            .delegate_orders("d1", "")
            .iter()
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(mine, vec!["o1", "o3"]);
    }

    #[test]
    fn test_driver_worklist_filters_brand_and_archived() {
        let store = store();
        let list: Vec<_> = store
            .driver_worklist(&[Brand::Badaa], "")
            .iter()
            .map(|o| o.id.clone())
            .collect();
        // o2 is Badaa but archived, o3 is Badaa and active
        assert_eq!(list, vec!["o3"]);
    }

    #[test]
    fn test_separators_pass_driver_filters_but_never_search() {
        let mut sep = order("SEP-1", "", Brand::Mahfaza, OrderStatus::Pending);
        sep.is_separator = true;
        sep.separator_text = Some("afternoon run".to_string());
        let mut orders = store().orders.clone();
        orders.insert(0, sep);
        let store = OrderStore::new(orders);

        // Passes the brand/status filters untouched, even under a query
        // that matches nothing
        let list = store.driver_worklist(&[Brand::Badaa], "zzz");
        assert_eq!(list.len(), 1);
        assert!(list[0].is_separator);

        // Never selected by manager scope or the archive
        assert!(store.all_orders("").iter().all(|o| !o.is_separator));
        assert!(
            store
                .driver_archive(&[Brand::Mahfaza])
                .iter()
                .all(|o| !o.is_separator)
        );
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let mut o = order("o9", "d1", Brand::Mahfaza, OrderStatus::Pending);
        o.customer_name = "Karrada Customer".to_string();
        o.area = "Karrada".to_string();
        o.phone_number = "0770123".to_string();
        assert!(matches_search(&o, "Karr"));
        assert!(matches_search(&o, "770"));
        assert!(!matches_search(&o, "karr"));
        assert!(!matches_search(&o, "999"));
    }

    #[test]
    fn test_split_archived_is_pure_status_partition() {
        let store = store();
        let (active, archived) = split_archived(store.all_orders(""));
        let active_ids: Vec<_> = active.iter().map(|o| o.id.clone()).collect();
        let archived_ids: Vec<_> = archived.iter().map(|o| o.id.clone()).collect();
        assert_eq!(active_ids, vec!["o1", "o3"]);
        assert_eq!(archived_ids, vec!["o2", "o4"]);
    }

    #[test]
    fn test_urgent_pinned_first_under_any_sort() {
        let mut o1 = order("o1", "d1", Brand::Mahfaza, OrderStatus::Pending);
        let mut o2 = order("o2", "d1", Brand::Mahfaza, OrderStatus::Pending);
        let o3 = order("o3", "d1", Brand::Mahfaza, OrderStatus::Pending);
        o1.area = "A".to_string();
        o2.area = "Z".to_string();
        o2.is_urgent = true;
        let store = OrderStore::new(vec![o1, o2, o3]);

        let mut list = store.all_orders("");
        sort_view(&mut list, SortKey::Area, SortDir::Asc);
        assert_eq!(list[0].id, "o2");
    }

    #[test]
    fn test_move_relative_is_a_permutation() {
        let mut store = store();
        let before: Vec<_> = store.orders().iter().map(|o| o.id.clone()).collect();

        store.move_relative("o4", "o1", Placement::Before).unwrap();
        let after: Vec<_> = store.orders().iter().map(|o| o.id.clone()).collect();
        assert_eq!(after, vec!["o4", "o1", "o2", "o3"]);

        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        assert_eq!(sorted_before, sorted_after);
    }

    #[test]
    fn test_move_relative_after_keeps_invisible_relative_order() {
        let mut store = store();
        store.move_relative("o1", "o3", Placement::After).unwrap();
        let ids: Vec<_> = store.orders().iter().map(|o| o.id.clone()).collect();
        // o2 and o4 (invisible to a hypothetical view) keep o2-before-o4
        assert_eq!(ids, vec!["o2", "o3", "o1", "o4"]);
    }

    #[test]
    fn test_move_relative_missing_ids_surface_not_found() {
        let mut store = store();
        assert!(matches!(
            store.move_relative("nope", "o1", Placement::Before),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.move_relative("o1", "nope", Placement::Before),
            Err(AppError::NotFound(_))
        ));
        // And a failed move changed nothing
        assert_eq!(store.orders()[0].id, "o1");
    }
}
