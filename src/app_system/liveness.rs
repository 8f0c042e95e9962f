//! Periodic backend reachability probe.
//!
//! Advisory only: the indicator feeds the navigation chrome and never gates
//! any other operation.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::api::OrdersApi;

/// Whether the backend answered the last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Online,
    Offline,
}

/// Probe the backend on a fixed interval and publish the result. The first
/// probe fires immediately; transitions are logged, steady states are not.
#[instrument(name = "liveness", skip(api, status_tx))]
pub async fn probe_loop(api: OrdersApi, interval: Duration, status_tx: watch::Sender<ApiStatus>) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        let status = if api.probe().await {
            ApiStatus::Online
        } else {
            ApiStatus::Offline
        };

        if *status_tx.borrow() != status {
            match status {
                ApiStatus::Online => info!("Backend reachable"),
                ApiStatus::Offline => warn!("Backend unreachable"),
            }
        } else {
            debug!(?status, "Probe completed");
        }
        let _ = status_tx.send(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{free_port, StubBackend, StubReply};
    use url::Url;

    #[tokio::test]
    async fn reports_online_when_the_backend_answers() {
        let stub = StubBackend::spawn(|_| StubReply::json(200, "[]"));
        let api = OrdersApi::new(stub.base_url());
        let (tx, mut rx) = watch::channel(ApiStatus::Offline);
        tokio::spawn(probe_loop(api, Duration::from_millis(20), tx));

        tokio::time::timeout(Duration::from_secs(2), async {
            while *rx.borrow() != ApiStatus::Online {
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("probe never reported online");
    }

    #[tokio::test]
    async fn reports_offline_when_the_backend_is_gone() {
        let url = format!("http://127.0.0.1:{}/api/orderdetails", free_port());
        let api = OrdersApi::new(Url::parse(&url).unwrap());
        let (tx, mut rx) = watch::channel(ApiStatus::Online);
        tokio::spawn(probe_loop(api, Duration::from_millis(20), tx));

        tokio::time::timeout(Duration::from_secs(2), async {
            while *rx.borrow() != ApiStatus::Offline {
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("probe never reported offline");
    }
}
