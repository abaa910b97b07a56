//! Delegate view - order intake and own-orders tracking
//!
//! Two intake forms feed the engine. The carpet form rejects
//! non-numeric phone and count before anything is stored; the
//! ancillary-services form only normalizes digits, its count-free
//! payload has nothing left to reject.

use shared::{Brand, Order, OrderDraft, Price, ProgressStats, Role, ServiceCategory};

use crate::core::AppState;
use crate::orders::store::split_archived;
use crate::reports::{self, Period};
use crate::utils::digits::{digits_only, to_ascii_digits};
use crate::utils::validation::{parse_count, validate_required_text};
use crate::utils::AppResult;

use super::require_role;

/// Carpet-washing intake form, raw field values as typed
#[derive(Debug, Clone, Default)]
pub struct CarpetOrderForm {
    /// Present when editing an existing order
    pub id: Option<String>,
    pub customer_name: String,
    pub phone_number: String,
    pub area: String,
    pub landmark: String,
    pub how_heard: String,
    pub referred_by: String,
    pub carpet_count: String,
    pub price: String,
    pub notes: String,
    pub brand: Option<Brand>,
}

impl CarpetOrderForm {
    /// Normalize and validate into an engine payload
    fn into_draft(self, default_brand: Brand) -> AppResult<OrderDraft> {
        validate_required_text(&self.customer_name, "customerName")?;
        validate_required_text(&self.area, "area")?;

        let phone = digits_only(&self.phone_number);
        validate_required_text(&phone, "phoneNumber")?;
        let count = parse_count(&to_ascii_digits(self.carpet_count.trim()), "carpetCount")?;

        Ok(OrderDraft {
            id: self.id,
            customer_name: Some(self.customer_name.trim().to_string()),
            phone_number: Some(phone),
            area: Some(self.area.trim().to_string()),
            landmark: non_empty(self.landmark),
            how_heard: non_empty(self.how_heard),
            referred_by: non_empty(self.referred_by),
            carpet_count: Some(count),
            price: parse_price(&self.price),
            notes: non_empty(self.notes),
            brand: Some(self.brand.unwrap_or(default_brand)),
            service_type: Some(ServiceCategory::Carpet),
        })
    }
}

/// Ancillary-services intake form (sofa, house, car, laundry)
#[derive(Debug, Clone, Default)]
pub struct ServiceOrderForm {
    pub id: Option<String>,
    pub customer_name: String,
    pub phone_number: String,
    pub area: String,
    pub service_type: ServiceCategory,
    pub price: String,
    pub notes: String,
    pub brand: Option<Brand>,
}

impl ServiceOrderForm {
    fn into_draft(self, default_brand: Brand) -> AppResult<OrderDraft> {
        validate_required_text(&self.customer_name, "customerName")?;
        let phone = digits_only(&self.phone_number);
        validate_required_text(&phone, "phoneNumber")?;

        Ok(OrderDraft {
            id: self.id,
            customer_name: Some(self.customer_name.trim().to_string()),
            phone_number: Some(phone),
            area: Some(self.area.trim().to_string()),
            landmark: None,
            how_heard: None,
            referred_by: None,
            carpet_count: None,
            price: parse_price(&self.price),
            notes: non_empty(self.notes),
            brand: Some(self.brand.unwrap_or(default_brand)),
            service_type: Some(self.service_type),
        })
    }
}

/// Brand preselected in the intake forms: the delegate's first
/// membership
pub fn default_brand(state: &AppState) -> Brand {
    state
        .current_user()
        .and_then(|u| u.assigned_brands.first().copied())
        .unwrap_or(Brand::Mahfaza)
}

pub fn submit_carpet_order(state: &mut AppState, form: CarpetOrderForm) -> AppResult<String> {
    let actor = require_role(state, Role::Delegate)?;
    let draft = form.into_draft(first_brand(&actor))?;
    state.mutate_orders(|orders| orders.create_or_update(draft, &actor))
}

pub fn submit_service_order(state: &mut AppState, form: ServiceOrderForm) -> AppResult<String> {
    let actor = require_role(state, Role::Delegate)?;
    let draft = form.into_draft(first_brand(&actor))?;
    state.mutate_orders(|orders| orders.create_or_update(draft, &actor))
}

/// Own orders, split into (active, archived). The query is
/// digit-normalized before matching.
pub fn my_orders<'a>(state: &'a AppState, query: &str) -> (Vec<&'a Order>, Vec<&'a Order>) {
    let Some(user) = state.current_user() else {
        return (Vec::new(), Vec::new());
    };
    let query = to_ascii_digits(query);
    split_archived(state.orders().store().delegate_orders(&user.id, &query))
}

/// Field progress over the delegate's own orders
pub fn progress(state: &AppState, period: Period) -> AppResult<ProgressStats> {
    let user = require_role(state, Role::Delegate)?;
    let mine = state.orders().store().delegate_orders(&user.id, "");
    Ok(reports::field_progress(&mine, period))
}

fn first_brand(user: &shared::User) -> Brand {
    user.assigned_brands.first().copied().unwrap_or(Brand::Mahfaza)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Price stays as typed: numeric text becomes a number, anything else
/// (including ranges like "20-25k") is kept verbatim
fn parse_price(raw: &str) -> Option<Price> {
    let normalized = to_ascii_digits(raw.trim());
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse::<f64>() {
        Ok(n) => Some(Price::Number(n)),
        Err(_) => Some(Price::Text(normalized)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::{LogAction, OrderStatus, UserCreate};

    fn logged_in_delegate(dir: &std::path::Path) -> AppState {
        let mut state =
            AppState::initialize(Config::with_work_dir(dir.to_string_lossy())).unwrap();
        let id = state
            .mutate_directory(|d| {
                d.create_user(UserCreate {
                    name: "Ali".to_string(),
                    code: "1001".to_string(),
                    role: Role::Delegate,
                    assigned_brands: vec![Brand::Badaa],
                })
            })
            .unwrap();
        state.login(Role::Delegate, Some(&id), "1001").unwrap();
        state
    }

    #[test]
    fn test_carpet_intake_normalizes_and_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = logged_in_delegate(tmp.path());

        let id = submit_carpet_order(
            &mut state,
            CarpetOrderForm {
                customer_name: "Ali".to_string(),
                phone_number: "٠٧٧٠١٢٣".to_string(),
                area: "Karrada".to_string(),
                carpet_count: "٣".to_string(),
                ..CarpetOrderForm::default()
            },
        )
        .unwrap();

        let order = state.orders().store().find(&id).unwrap();
        assert_eq!(order.phone_number, "0770123");
        assert_eq!(order.carpet_count, 3);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.brand, Brand::Badaa, "delegate's first membership");
        assert_eq!(order.logs.len(), 1);
        assert_eq!(order.logs[0].action, LogAction::Created);
    }

    #[test]
    fn test_carpet_intake_rejects_non_numeric_count() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = logged_in_delegate(tmp.path());
        let before = state.orders().store().len();

        let err = submit_carpet_order(
            &mut state,
            CarpetOrderForm {
                customer_name: "Ali".to_string(),
                phone_number: "0770123".to_string(),
                area: "Karrada".to_string(),
                carpet_count: "three".to_string(),
                ..CarpetOrderForm::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, crate::utils::AppError::Validation(_)));
        assert_eq!(state.orders().store().len(), before, "nothing stored");
    }

    #[test]
    fn test_service_intake_has_no_count_field() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = logged_in_delegate(tmp.path());
        let id = submit_service_order(
            &mut state,
            ServiceOrderForm {
                customer_name: "Hasan".to_string(),
                phone_number: "٠٧٥٠ ٩٩٩".to_string(),
                area: "Mansour".to_string(),
                service_type: ServiceCategory::Sofa,
                price: "20-25".to_string(),
                ..ServiceOrderForm::default()
            },
        )
        .unwrap();

        let order = state.orders().store().find(&id).unwrap();
        assert_eq!(order.phone_number, "0750999");
        assert_eq!(order.carpet_count, 0);
        assert_eq!(order.service_type, ServiceCategory::Sofa);
        assert_eq!(order.price, Some(Price::Text("20-25".to_string())));
    }

    #[test]
    fn test_my_orders_normalizes_search_query() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = logged_in_delegate(tmp.path());
        submit_carpet_order(
            &mut state,
            CarpetOrderForm {
                customer_name: "Ali".to_string(),
                phone_number: "0770123".to_string(),
                area: "Karrada".to_string(),
                carpet_count: "1".to_string(),
                ..CarpetOrderForm::default()
            },
        )
        .unwrap();

        let (active, archived) = my_orders(&state, "٧٧٠");
        assert_eq!(active.len(), 1);
        assert!(archived.is_empty());
        let (none, _) = my_orders(&state, "٩٩٩");
        assert!(none.is_empty());
    }

    #[test]
    fn test_price_numeric_text_becomes_number() {
        assert_eq!(parse_price("٢٥"), Some(Price::Number(25.0)));
        assert_eq!(parse_price("  "), None);
        assert_eq!(parse_price("25k"), Some(Price::Text("25k".to_string())));
    }
}
