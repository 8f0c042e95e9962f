//! # Mock Framework
//!
//! Utilities for testing services in isolation: a captured toast stream and
//! a stub HTTP backend the real [`OrdersApi`](crate::api::OrdersApi) talks
//! to over a loopback socket.
//!
//! # Testing Strategy
//! Service logic is exercised through its client with the real message
//! plumbing in place; only the edges are faked. Toasts are observed by
//! registering an extra subscriber, and the backend is a `tiny_http` server
//! on an ephemeral port driven by a canned handler closure.

use std::io::Read;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server};
use tokio::sync::mpsc;
use url::Url;

use crate::clients::ToastClient;
use crate::domain::Order;
use crate::toast::{Toast, ToastService};

/// Spawn a toast service with a capture subscriber already registered.
/// Everything published through the returned client shows up on the
/// receiver.
pub fn spawn_toast_capture() -> (ToastClient, mpsc::UnboundedReceiver<Toast>) {
    let (mut service, client) = ToastService::new(10);
    let receiver = service.register_subscriber();
    tokio::spawn(service.run());
    (client, receiver)
}

/// An order with plausible field values for list-level tests.
pub fn sample_order(id: u64, total: f64, customer_id: u64, payment_mode: &str, shop_id: &str) -> Order {
    Order::new(
        Some(id),
        format!("2025-06-{:02}T10:30:00", (id % 27) + 1),
        total,
        customer_id,
        payment_mode,
        shop_id,
    )
}

/// A port nothing is listening on, for provoking connection failures.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let port = listener.local_addr().expect("listener addr").port();
    drop(listener);
    port
}

/// A canned reply from the stub backend.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
}

impl StubReply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request as observed by the stub backend.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Stub order backend on an ephemeral loopback port. The handler closure
/// decides the reply per request; every request is recorded for assertions.
/// The serving thread ends with the process.
pub struct StubBackend {
    base_url: Url,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubBackend {
    pub fn spawn<F>(mut handler: F) -> Self
    where
        F: FnMut(&SeenRequest) -> StubReply + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("bind stub server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("stub server address")
            .port();
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}/api/orderdetails"))
            .expect("stub base url");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let observed = SeenRequest {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    body,
                };
                seen.lock().expect("stub request log").push(observed.clone());

                let reply = handler(&observed);
                let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("content type header");
                let response = Response::from_string(reply.body)
                    .with_status_code(reply.status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        Self { base_url, requests }
    }

    /// Stub that always serves the given collection on any request.
    pub fn serving(orders: Vec<Order>) -> Self {
        let body = serde_json::to_string(&orders).expect("orders json");
        Self::spawn(move |_| StubReply::json(200, body.clone()))
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("stub request log").len()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().expect("stub request log").clone()
    }
}
