//! The order list view.
//!
//! Single owner of the in-memory order set and everything derived from it:
//! stats, the filtered/sorted/paginated view, the editor, and the delete
//! confirmation. Mutations go to the backend first; local state changes
//! only after the server confirms. Because requests drain through one
//! mailbox and each load is awaited inline, a slow earlier reload can never
//! clobber a newer one.

pub mod format;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::api::OrdersApi;
use crate::clients::{OrderListClient, ToastClient};
use crate::domain::{Order, PaymentMode};
use crate::form::OrderForm;
use crate::messages::{OrderListRequest, ServiceResponse};
use crate::pipeline::{compute_stats, ListState, OrderStats, SortDir, SortField, PAGE_SIZE};

/// Editor state. `Editing` holds a copy of the order being changed; its id
/// decides whether a submit creates or updates.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Closed,
    Creating,
    Editing(Order),
}

/// Two-phase delete confirmation. Only `confirm` reaches the backend;
/// cancelling discards the target without network traffic.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmState {
    Idle,
    Pending(Order),
}

/// The view as re-rendered after a request. The rendering layer reads
/// this; tests assert on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub loading: bool,
    pub submitting: bool,
    pub stats: OrderStats,
    pub search: String,
    pub payment_filter: Option<PaymentMode>,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub page: Vec<Order>,
    pub editor: EditorState,
    pub confirm: ConfirmState,
}

impl ViewSnapshot {
    /// 1-based page numbers for the pager strip.
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    /// 1-based positions of the visible slice within the filtered list;
    /// `(0, 0)` when nothing matched.
    pub fn page_range(&self) -> (usize, usize) {
        if self.filtered_count == 0 {
            return (0, 0);
        }
        let start = (self.current_page - 1) * PAGE_SIZE + 1;
        let end = (self.current_page * PAGE_SIZE).min(self.filtered_count);
        (start, end)
    }
}

pub struct OrderListService {
    receiver: mpsc::Receiver<OrderListRequest>,
    api: OrdersApi,
    toast: ToastClient,
    all_orders: Vec<Order>,
    list: ListState,
    stats: OrderStats,
    loading: bool,
    submitting: bool,
    editor: EditorState,
    confirm: ConfirmState,
}

impl OrderListService {
    pub fn new(
        buffer_size: usize,
        api: OrdersApi,
        toast: ToastClient,
    ) -> (Self, OrderListClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            api,
            toast,
            all_orders: Vec::new(),
            list: ListState::new(),
            stats: OrderStats::default(),
            loading: false,
            submitting: false,
            editor: EditorState::Closed,
            confirm: ConfirmState::Idle,
        };
        (service, OrderListClient::new(sender))
    }

    #[instrument(name = "order_list", skip(self))]
    pub async fn run(mut self) {
        info!("OrderListService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderListRequest::Load { respond_to } => {
                    self.handle_load().await;
                    self.respond(respond_to);
                }
                OrderListRequest::Refresh { respond_to } => {
                    self.handle_refresh().await;
                    self.respond(respond_to);
                }
                OrderListRequest::Search { query, respond_to } => {
                    self.handle_search(query);
                    self.respond(respond_to);
                }
                OrderListRequest::ClearSearch { respond_to } => {
                    self.handle_clear_search();
                    self.respond(respond_to);
                }
                OrderListRequest::FilterPayment { mode, respond_to } => {
                    self.handle_filter_payment(mode);
                    self.respond(respond_to);
                }
                OrderListRequest::SortBy { field, respond_to } => {
                    self.handle_sort_by(field);
                    self.respond(respond_to);
                }
                OrderListRequest::GoToPage { page, respond_to } => {
                    self.handle_go_to_page(page);
                    self.respond(respond_to);
                }
                OrderListRequest::OpenCreate { respond_to } => {
                    self.handle_open_create();
                    self.respond(respond_to);
                }
                OrderListRequest::OpenEdit { id, respond_to } => {
                    self.handle_open_edit(id);
                    self.respond(respond_to);
                }
                OrderListRequest::CloseEditor { respond_to } => {
                    self.handle_close_editor();
                    self.respond(respond_to);
                }
                OrderListRequest::Submit { form, respond_to } => {
                    self.handle_submit(form).await;
                    self.respond(respond_to);
                }
                OrderListRequest::RequestDelete { id, respond_to } => {
                    self.handle_request_delete(id);
                    self.respond(respond_to);
                }
                OrderListRequest::ConfirmDelete { respond_to } => {
                    self.handle_confirm_delete().await;
                    self.respond(respond_to);
                }
                OrderListRequest::CancelDelete { respond_to } => {
                    self.handle_cancel_delete();
                    self.respond(respond_to);
                }
                OrderListRequest::Shutdown => {
                    info!("OrderListService shutting down");
                    break;
                }
            }
        }

        info!("OrderListService stopped");
    }

    fn respond(&self, respond_to: ServiceResponse<ViewSnapshot>) {
        let _ = respond_to.send(self.snapshot());
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            loading: self.loading,
            submitting: self.submitting,
            stats: self.stats.clone(),
            search: self.list.search.clone(),
            payment_filter: self.list.payment_filter,
            sort_field: self.list.sort_field,
            sort_dir: self.list.sort_dir,
            current_page: self.list.current_page,
            total_pages: self.list.total_pages(),
            filtered_count: self.list.filtered().len(),
            page: self.list.page_slice().to_vec(),
            editor: self.editor.clone(),
            confirm: self.confirm.clone(),
        }
    }

    /// Re-derive stats and view after a load; the page starts over at 1.
    fn recompute_fresh(&mut self) {
        self.stats = compute_stats(&self.all_orders);
        self.list.apply(&self.all_orders);
    }

    /// Re-derive stats and view after a mutation; the page stays put,
    /// clamped if the set shrank under it.
    fn recompute_in_place(&mut self) {
        self.stats = compute_stats(&self.all_orders);
        self.list.reapply(&self.all_orders);
    }

    #[instrument(skip(self))]
    async fn handle_load(&mut self) {
        debug!("Processing load request");
        self.loading = true;

        match self.api.list_all().await {
            Ok(orders) => {
                info!(order_count = orders.len(), "Orders loaded");
                self.all_orders = orders;
                self.recompute_fresh();
            }
            Err(e) => {
                error!(error = %e, "Order load failed");
                self.toast.error(e.to_string()).await;
            }
        }

        self.loading = false;
    }

    async fn handle_refresh(&mut self) {
        self.toast.info("Refreshing orders...").await;
        self.handle_load().await;
    }

    #[instrument(skip(self, query))]
    fn handle_search(&mut self, query: String) {
        debug!(query = %query, "Processing search request");
        self.list.set_search(&self.all_orders, query);
    }

    fn handle_clear_search(&mut self) {
        debug!("Clearing search");
        self.list.clear_search(&self.all_orders);
    }

    #[instrument(skip(self))]
    fn handle_filter_payment(&mut self, mode: Option<PaymentMode>) {
        debug!("Processing payment filter request");
        self.list.set_payment_filter(&self.all_orders, mode);
    }

    #[instrument(skip(self))]
    fn handle_sort_by(&mut self, field: SortField) {
        debug!("Processing sort request");
        self.list.toggle_sort(&self.all_orders, field);
    }

    fn handle_go_to_page(&mut self, page: usize) {
        debug!(page, "Processing page request");
        self.list.go_to_page(page);
    }

    fn handle_open_create(&mut self) {
        debug!("Opening editor for a new order");
        self.editor = EditorState::Creating;
    }

    #[instrument(fields(order_id = %id), skip(self))]
    fn handle_open_edit(&mut self, id: u64) {
        match self.all_orders.iter().find(|o| o.id == Some(id)) {
            Some(order) => {
                debug!("Opening editor");
                self.editor = EditorState::Editing(order.clone());
            }
            None => warn!("Edit requested for unknown order"),
        }
    }

    fn handle_close_editor(&mut self) {
        debug!("Closing editor");
        self.editor = EditorState::Closed;
    }

    /// Create or update, depending on what the editor holds. The in-memory
    /// set is only touched after the backend confirms.
    #[instrument(skip(self, form))]
    async fn handle_submit(&mut self, form: OrderForm) {
        if self.submitting {
            warn!("Submission already in flight, ignoring");
            return;
        }
        let target = match &self.editor {
            EditorState::Closed => {
                warn!("Submit with no editor open, ignoring");
                return;
            }
            EditorState::Creating => None,
            EditorState::Editing(order) => order.id,
        };

        let order = match form.validate() {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "Form validation failed");
                self.toast.error(e.to_string()).await;
                return;
            }
        };

        self.submitting = true;
        match target {
            None => self.submit_create(order).await,
            Some(id) => self.submit_update(id, order).await,
        }
        self.submitting = false;
    }

    async fn submit_create(&mut self, order: Order) {
        match self.api.create(&order).await {
            Ok(created) => {
                info!(order_id = ?created.id, "Order created");
                self.all_orders.insert(0, created);
                self.editor = EditorState::Closed;
                self.recompute_in_place();
                self.toast.success("Order created successfully").await;
            }
            Err(e) => {
                error!(error = %e, "Order create failed");
                self.toast.error(e.to_string()).await;
            }
        }
    }

    async fn submit_update(&mut self, id: u64, mut order: Order) {
        order.id = Some(id);
        match self.api.update(id, &order).await {
            Ok(updated) => {
                info!(order_id = id, "Order updated");
                // The server's returned representation wins over the payload.
                if let Some(slot) = self.all_orders.iter_mut().find(|o| o.id == Some(id)) {
                    *slot = updated;
                }
                self.editor = EditorState::Closed;
                self.recompute_in_place();
                self.toast
                    .success(format!("Order #{id} updated successfully"))
                    .await;
            }
            Err(e) => {
                error!(error = %e, "Order update failed");
                self.toast.error(e.to_string()).await;
            }
        }
    }

    #[instrument(fields(order_id = %id), skip(self))]
    fn handle_request_delete(&mut self, id: u64) {
        match self.all_orders.iter().find(|o| o.id == Some(id)) {
            Some(order) => {
                debug!("Delete confirmation pending");
                self.confirm = ConfirmState::Pending(order.clone());
            }
            None => warn!("Delete requested for unknown order"),
        }
    }

    #[instrument(skip(self))]
    async fn handle_confirm_delete(&mut self) {
        if self.submitting {
            warn!("Submission already in flight, ignoring");
            return;
        }
        let target = match std::mem::replace(&mut self.confirm, ConfirmState::Idle) {
            ConfirmState::Pending(order) => order,
            ConfirmState::Idle => {
                debug!("Confirm with no delete pending, ignoring");
                return;
            }
        };
        let Some(id) = target.id else {
            // Orders in the set always carry ids; nothing to delete otherwise.
            return;
        };

        self.submitting = true;
        match self.api.delete(id).await {
            Ok(()) => {
                info!(order_id = id, "Order deleted");
                self.all_orders.retain(|o| o.id != Some(id));
                self.recompute_in_place();
                self.toast
                    .success(format!("Order #{id} deleted successfully"))
                    .await;
            }
            Err(e) => {
                error!(error = %e, "Order delete failed");
                self.toast.error(e.to_string()).await;
            }
        }
        self.submitting = false;
    }

    fn handle_cancel_delete(&mut self) {
        debug!("Delete cancelled");
        self.confirm = ConfirmState::Idle;
    }
}
