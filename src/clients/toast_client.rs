use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::messages::{ChannelError, ToastRequest};
use crate::toast::{Severity, Toast};

/// Client for the notification channel. Publishing is fire-and-forget: if
/// the channel is gone the notification is silently dropped, since there is
/// nobody left to show it to.
#[derive(Clone)]
pub struct ToastClient {
    sender: mpsc::Sender<ToastRequest>,
}

impl ToastClient {
    pub fn new(sender: mpsc::Sender<ToastRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self, message))]
    pub async fn publish(&self, message: String, severity: Severity) {
        debug!("Sending request");
        if self
            .sender
            .send(ToastRequest::Publish { message, severity })
            .await
            .is_err()
        {
            debug!("Toast channel closed, notification dropped");
        }
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.publish(message.into(), Severity::Success).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.publish(message.into(), Severity::Error).await;
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.publish(message.into(), Severity::Info).await;
    }

    #[allow(dead_code)]
    pub async fn warning(&self, message: impl Into<String>) {
        self.publish(message.into(), Severity::Warning).await;
    }

    /// Register a subscriber. Only toasts published after this call are
    /// delivered.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<Toast>, ChannelError> {
        debug!("Sending request");
        let (respond_to, response) = tokio::sync::oneshot::channel();
        self.sender
            .send(ToastRequest::Subscribe { respond_to })
            .await
            .map_err(|_| ChannelError::Closed)?;
        response.await.map_err(|_| ChannelError::Dropped)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ChannelError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ToastRequest::Shutdown)
            .await
            .map_err(|_| ChannelError::Closed)
    }
}
