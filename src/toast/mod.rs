//! Transient notification channel.
//!
//! Any part of the app can publish a message with a severity; subscribers
//! render it and let it expire. Delivery is fire-and-forget: a subscriber
//! registered after a publish never sees it, and publishing with nobody
//! listening is not an error.

pub mod renderer;

pub use renderer::ToastRenderer;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::ToastClient;
use crate::messages::ToastRequest;

/// Severity of a notification, driving how the renderer presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// One transient notification. Ids are assigned by the channel's counter
/// and grow monotonically for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// The notification channel actor: owns the id counter and the subscriber
/// list, so no process-wide singleton is needed.
pub struct ToastService {
    receiver: mpsc::Receiver<ToastRequest>,
    subscribers: Vec<mpsc::UnboundedSender<Toast>>,
    counter: u64,
}

impl ToastService {
    pub fn new(buffer_size: usize) -> (Self, ToastClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            subscribers: Vec::new(),
            counter: 0,
        };
        (service, ToastClient::new(sender))
    }

    /// Register a subscriber before the service task is spawned. The
    /// composition root uses this to wire the renderer; everyone else
    /// subscribes through the client.
    pub fn register_subscriber(&mut self) -> mpsc::UnboundedReceiver<Toast> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    #[instrument(name = "toast_service", skip(self))]
    pub async fn run(mut self) {
        info!("ToastService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ToastRequest::Publish { message, severity } => {
                    self.handle_publish(message, severity);
                }
                ToastRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(self.register_subscriber());
                }
                ToastRequest::Shutdown => {
                    info!("ToastService shutting down");
                    break;
                }
            }
        }

        info!("ToastService stopped");
    }

    #[instrument(fields(severity = ?severity), skip(self, message, severity))]
    fn handle_publish(&mut self, message: String, severity: Severity) {
        self.counter += 1;
        let toast = Toast {
            id: self.counter,
            message,
            severity,
        };
        debug!(toast_id = toast.id, "Publishing toast");
        // Deliver to live subscribers, prune the closed ones.
        self.subscribers
            .retain(|subscriber| subscriber.send(toast.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_monotone_from_one() {
        let (mut service, client) = ToastService::new(10);
        let mut rx = service.register_subscriber();
        tokio::spawn(service.run());

        client.info("first").await;
        client.info("second").await;

        assert_eq!(rx.recv().await.unwrap().id, 1);
        assert_eq!(rx.recv().await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn wrappers_tag_severity() {
        let (mut service, client) = ToastService::new(10);
        let mut rx = service.register_subscriber();
        tokio::spawn(service.run());

        client.success("s").await;
        client.error("e").await;
        client.info("i").await;
        client.warning("w").await;

        let severities: Vec<Severity> = [
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
        ]
        .into_iter()
        .map(|t| t.severity)
        .collect();
        assert_eq!(
            severities,
            vec![
                Severity::Success,
                Severity::Error,
                Severity::Info,
                Severity::Warning
            ]
        );
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_toasts() {
        let (service, client) = ToastService::new(10);
        tokio::spawn(service.run());

        client.info("before anyone listened").await;

        let mut rx = client.subscribe().await.unwrap();
        client.info("after subscribing").await;

        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.message, "after subscribing");
    }

    #[tokio::test]
    async fn publishing_with_no_subscribers_is_fine() {
        let (service, client) = ToastService::new(10);
        tokio::spawn(service.run());

        client.info("shouting into the void").await;

        // Channel still works afterwards.
        let mut rx = client.subscribe().await.unwrap();
        client.info("heard").await;
        assert_eq!(rx.recv().await.unwrap().message, "heard");
    }

    #[tokio::test]
    async fn closed_subscribers_are_pruned() {
        let (mut service, client) = ToastService::new(10);
        let dropped = service.register_subscriber();
        let mut kept = service.register_subscriber();
        tokio::spawn(service.run());

        drop(dropped);
        client.info("still delivered").await;

        assert_eq!(kept.recv().await.unwrap().message, "still delivered");
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_toast() {
        let (mut service, client) = ToastService::new(10);
        let mut a = service.register_subscriber();
        let mut b = service.register_subscriber();
        tokio::spawn(service.run());

        client.warning("fan out").await;

        assert_eq!(a.recv().await.unwrap().message, "fan out");
        assert_eq!(b.recv().await.unwrap().message, "fan out");
    }
}
