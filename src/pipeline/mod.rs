//! Derivation of the visible order list.
//!
//! Pure list processing over the in-memory order set, in a fixed stage
//! order: text filter, payment filter, sort, paginate. [`ListState`] owns
//! the query knobs plus the derived filtered vector; nothing here talks to
//! the network or holds state that could drift from the full set.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{Order, PaymentMode};

/// Rows per page. Fixed for the lifetime of the view.
pub const PAGE_SIZE: usize = 10;

/// Aggregates over the full order set. Always recomputed from scratch,
/// never maintained incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub revenue: f64,
    pub avg_order: f64,
    pub unique_customers: usize,
}

pub fn compute_stats(orders: &[Order]) -> OrderStats {
    let total = orders.len();
    let revenue: f64 = orders.iter().map(|o| o.total).sum();
    let unique_customers = orders
        .iter()
        .map(|o| o.customer_id)
        .collect::<HashSet<_>>()
        .len();
    OrderStats {
        total,
        revenue,
        avg_order: if total == 0 { 0.0 } else { revenue / total as f64 },
        unique_customers,
    }
}

/// Sortable columns of the order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    DateOfPurchase,
    Total,
    CustomerId,
    PaymentMode,
    ShopId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    fn flipped(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

fn compare(a: &Order, b: &Order, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::DateOfPurchase => compare_ci(&a.date_of_purchase, &b.date_of_purchase),
        SortField::Total => a.total.total_cmp(&b.total),
        SortField::CustomerId => a.customer_id.cmp(&b.customer_id),
        SortField::PaymentMode => compare_ci(&a.payment_mode, &b.payment_mode),
        SortField::ShopId => compare_ci(&a.shop_id, &b.shop_id),
    }
}

// String columns compare case-insensitively.
fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort by the chosen field. Equal keys keep their relative order.
pub fn sort_orders(orders: &mut [Order], field: SortField, dir: SortDir) {
    orders.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

fn matches_search(order: &Order, query: &str) -> bool {
    let id = order.id.map(|id| id.to_string()).unwrap_or_default();
    id.contains(query)
        || order.customer_id.to_string().contains(query)
        || order.shop_id.to_lowercase().contains(query)
        || order.payment_mode.to_lowercase().contains(query)
}

/// Conjunction of the text filter and the payment filter. An empty query
/// matches everything, as does an absent payment selection.
pub fn filter_orders(all: &[Order], query: &str, payment: Option<PaymentMode>) -> Vec<Order> {
    let query = query.trim().to_lowercase();
    all.iter()
        .filter(|o| query.is_empty() || matches_search(o, &query))
        .filter(|o| payment.map_or(true, |mode| mode.matches(&o.payment_mode)))
        .cloned()
        .collect()
}

/// Query knobs plus the filtered, sorted view derived from them.
///
/// Changing the search text, the payment filter, or the sort resets the
/// page to 1; reapplying after a mutation keeps the page, clamped to the
/// last valid one when the set shrank.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub search: String,
    pub payment_filter: Option<PaymentMode>,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
    pub current_page: usize,
    filtered: Vec<Order>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            payment_filter: None,
            sort_field: SortField::Id,
            sort_dir: SortDir::Asc,
            current_page: 1,
            filtered: Vec::new(),
        }
    }

    pub fn set_search(&mut self, all: &[Order], query: impl Into<String>) {
        self.search = query.into();
        self.derive(all, true);
    }

    pub fn clear_search(&mut self, all: &[Order]) {
        self.set_search(all, "");
    }

    pub fn set_payment_filter(&mut self, all: &[Order], mode: Option<PaymentMode>) {
        self.payment_filter = mode;
        self.derive(all, true);
    }

    /// Toggling the current field flips direction; a new field starts
    /// ascending.
    pub fn toggle_sort(&mut self, all: &[Order], field: SortField) {
        if self.sort_field == field {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_field = field;
            self.sort_dir = SortDir::Asc;
        }
        self.derive(all, true);
    }

    /// 1-based navigation; anything outside `[1, total_pages]` is a no-op.
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        }
    }

    /// Re-derive after a load with a fresh page position.
    pub fn apply(&mut self, all: &[Order]) {
        self.derive(all, true);
    }

    /// Re-derive after a mutation, keeping the page where it was (clamped).
    pub fn reapply(&mut self, all: &[Order]) {
        self.derive(all, false);
    }

    fn derive(&mut self, all: &[Order], reset_page: bool) {
        self.filtered = filter_orders(all, &self.search, self.payment_filter);
        sort_orders(&mut self.filtered, self.sort_field, self.sort_dir);
        if reset_page {
            self.current_page = 1;
        } else if self.current_page > self.total_pages() {
            self.current_page = self.total_pages();
        }
    }

    pub fn filtered(&self) -> &[Order] {
        &self.filtered
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// The slice of the filtered list visible on the current page.
    pub fn page_slice(&self) -> &[Order] {
        let start = (self.current_page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.filtered.len());
        if start >= self.filtered.len() {
            &[]
        } else {
            &self.filtered[start..end]
        }
    }
}
