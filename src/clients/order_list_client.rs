use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::PaymentMode;
use crate::form::OrderForm;
use crate::messages::{ChannelError, OrderListRequest};
use crate::order_list::ViewSnapshot;
use crate::pipeline::SortField;

/// Client for the order list service. Every method stands for a gesture on
/// the view and returns the view as re-rendered after it.
#[derive(Clone)]
pub struct OrderListClient {
    sender: mpsc::Sender<OrderListRequest>,
}

impl OrderListClient {
    pub fn new(sender: mpsc::Sender<OrderListRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ChannelError> {
        debug!("Sending shutdown request");
        self.sender
            .send(OrderListRequest::Shutdown)
            .await
            .map_err(|_| ChannelError::Closed)
    }
}

crate::client_method!(OrderListClient => fn load() -> ViewSnapshot as OrderListRequest::Load);
crate::client_method!(OrderListClient => fn refresh() -> ViewSnapshot as OrderListRequest::Refresh);
crate::client_method!(OrderListClient => fn search(query: String) -> ViewSnapshot as OrderListRequest::Search);
crate::client_method!(OrderListClient => fn clear_search() -> ViewSnapshot as OrderListRequest::ClearSearch);
crate::client_method!(OrderListClient => fn filter_payment(mode: Option<PaymentMode>) -> ViewSnapshot as OrderListRequest::FilterPayment);
crate::client_method!(OrderListClient => fn sort_by(field: SortField) -> ViewSnapshot as OrderListRequest::SortBy);
crate::client_method!(OrderListClient => fn go_to_page(page: usize) -> ViewSnapshot as OrderListRequest::GoToPage);
crate::client_method!(OrderListClient => fn open_create() -> ViewSnapshot as OrderListRequest::OpenCreate);
crate::client_method!(OrderListClient => fn open_edit(id: u64) -> ViewSnapshot as OrderListRequest::OpenEdit);
crate::client_method!(OrderListClient => fn close_editor() -> ViewSnapshot as OrderListRequest::CloseEditor);
crate::client_method!(OrderListClient => fn submit(form: OrderForm) -> ViewSnapshot as OrderListRequest::Submit);
crate::client_method!(OrderListClient => fn request_delete(id: u64) -> ViewSnapshot as OrderListRequest::RequestDelete);
crate::client_method!(OrderListClient => fn confirm_delete() -> ViewSnapshot as OrderListRequest::ConfirmDelete);
crate::client_method!(OrderListClient => fn cancel_delete() -> ViewSnapshot as OrderListRequest::CancelDelete);
