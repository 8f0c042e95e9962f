//! REST client for the `orderdetails` collection.
//!
//! One method per verb, each normalizing its failures into [`ApiError`].
//! The collection read retries once before surfacing a failure; everything
//! else fails fast and leaves retrying to the user.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::api::ApiError;
use crate::domain::Order;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Cheaply cloneable handle on the backend collection.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    http: Client,
    base_url: String,
}

impl OrdersApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Fetch the full collection, retrying once on any failure.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Fetching order collection");
        match self.fetch_all().await {
            Ok(orders) => Ok(orders),
            Err(first) => {
                warn!(error = %first, "Collection fetch failed, retrying once");
                self.fetch_all().await
            }
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http
            .get(&self.base_url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn get(&self, id: u64) -> Result<Order, ApiError> {
        debug!("Fetching order");
        let response = self
            .http
            .get(self.item_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    /// Create an order. The payload carries no id; the returned order does.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub async fn create(&self, order: &Order) -> Result<Order, ApiError> {
        debug!("Creating order");
        let response = self
            .http
            .post(&self.base_url)
            .json(order)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    /// Replace the order at `id`. The id in the path is authoritative; the
    /// server's returned representation is what callers should keep.
    #[instrument(skip(self, order))]
    pub async fn update(&self, id: u64, order: &Order) -> Result<Order, ApiError> {
        debug!("Updating order");
        let response = self
            .http
            .put(self.item_url(id))
            .json(order)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        debug!("Deleting order");
        let response = self
            .http
            .delete(self.item_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(status.as_u16()))
        }
    }

    /// Reachability probe. Any HTTP response, whatever its status, counts as
    /// online; only a transport failure counts as offline.
    pub async fn probe(&self) -> bool {
        self.http
            .get(&self.base_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .is_ok()
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    match err.status() {
        Some(status) => ApiError::from_status(status.as_u16()),
        None => ApiError::Network,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16()));
    }
    response
        .json()
        .await
        .map_err(|_| ApiError::Server {
            status: status.as_u16(),
        })
}
