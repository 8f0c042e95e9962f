//! Typed message enums for service communication. Request variants carry
//! their parameters and, where the caller wants the re-rendered view, a
//! oneshot response channel.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::domain::PaymentMode;
use crate::form::OrderForm;
use crate::order_list::ViewSnapshot;
use crate::pipeline::SortField;
use crate::toast::{Severity, Toast};

/// Oneshot responder for request/response messages.
pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Failure talking to a service task. Service-level failures never travel
/// this way; they surface through the notification channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Actor closed")]
    Closed,
    #[error("Actor dropped")]
    Dropped,
}

/// Requests understood by the order list service. Each one mirrors a user
/// gesture on the view and responds with the view as re-rendered after it.
#[derive(Debug)]
pub enum OrderListRequest {
    Load {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    Refresh {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    Search {
        query: String,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    ClearSearch {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    FilterPayment {
        mode: Option<PaymentMode>,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    SortBy {
        field: SortField,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    GoToPage {
        page: usize,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    OpenCreate {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    OpenEdit {
        id: u64,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    CloseEditor {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    Submit {
        form: OrderForm,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    RequestDelete {
        id: u64,
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    ConfirmDelete {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    CancelDelete {
        respond_to: ServiceResponse<ViewSnapshot>,
    },
    Shutdown,
}

/// Requests understood by the toast service. Publishing is fire-and-forget.
#[derive(Debug)]
pub enum ToastRequest {
    Publish {
        message: String,
        severity: Severity,
    },
    Subscribe {
        respond_to: ServiceResponse<mpsc::UnboundedReceiver<Toast>>,
    },
    Shutdown,
}
