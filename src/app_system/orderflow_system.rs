use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::api::OrdersApi;
use crate::app_system::config::Config;
use crate::app_system::liveness::{self, ApiStatus};
use crate::clients::{OrderListClient, ToastClient};
use crate::order_list::OrderListService;
use crate::toast::{ToastRenderer, ToastService};

/// The composition root: starts the services, wires them together, and
/// handles shutdown. Holds the clients the driver talks through plus the
/// advisory backend status.
pub struct OrderflowSystem {
    pub orders: OrderListClient,
    pub toasts: ToastClient,
    pub api_status: watch::Receiver<ApiStatus>,
    handles: Vec<JoinHandle<()>>,
    probe_handle: JoinHandle<()>,
}

impl OrderflowSystem {
    /// Create and start the whole system.
    ///
    /// The toast channel starts first so every other service can notify;
    /// the renderer registers before the channel task spawns, so it sees
    /// every toast from the very first publish.
    #[instrument(name = "orderflow_system", skip(config))]
    pub fn new(config: Config) -> Self {
        let mut handles = Vec::new();

        info!("Starting orderflow system");

        let (mut toast_service, toasts) = ToastService::new(config.channel_capacity);
        let renderer = ToastRenderer::new(toast_service.register_subscriber());
        handles.push(tokio::spawn(toast_service.run()));
        handles.push(tokio::spawn(renderer.run()));

        let api = OrdersApi::new(config.api_url.clone());

        let (list_service, orders) =
            OrderListService::new(config.channel_capacity, api.clone(), toasts.clone());
        handles.push(tokio::spawn(list_service.run()));

        let (status_tx, api_status) = watch::channel(ApiStatus::Offline);
        let probe_handle = tokio::spawn(liveness::probe_loop(
            api,
            config.probe_interval,
            status_tx,
        ));

        info!("Orderflow system started successfully");

        Self {
            orders,
            toasts,
            api_status,
            handles,
            probe_handle,
        }
    }

    /// Gracefully shut the system down: order list first (it still publishes
    /// toasts while draining), then the toast channel, then the probe.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down orderflow system");

        let _ = self.orders.shutdown().await;
        let _ = self.toasts.shutdown().await;
        self.probe_handle.abort();

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service shutdown error: {e:?}"));
            }
        }

        info!("Orderflow system shutdown complete");
        Ok(())
    }
}
