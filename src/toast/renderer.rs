//! Renders toasts to the log and dismisses each one a fixed time after it
//! arrived. Every toast gets its own expiry, independent of the others;
//! since the duration is fixed, expiries fire in arrival order.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::toast::{Severity, Toast};

/// How long each toast stays visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3500);

pub struct ToastRenderer {
    receiver: mpsc::UnboundedReceiver<Toast>,
    active: VecDeque<(Instant, Toast)>,
}

impl ToastRenderer {
    pub fn new(receiver: mpsc::UnboundedReceiver<Toast>) -> Self {
        Self {
            receiver,
            active: VecDeque::new(),
        }
    }

    fn show(&mut self, toast: Toast, now: Instant) {
        match toast.severity {
            Severity::Success => info!(toast_id = toast.id, "{}", toast.message),
            Severity::Error => error!(toast_id = toast.id, "{}", toast.message),
            Severity::Info => info!(toast_id = toast.id, "{}", toast.message),
            Severity::Warning => warn!(toast_id = toast.id, "{}", toast.message),
        }
        self.active.push_back((now + DISPLAY_DURATION, toast));
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.active.front().map(|(deadline, _)| *deadline)
    }

    fn expire_due(&mut self, now: Instant) {
        while let Some((deadline, _)) = self.active.front() {
            if *deadline > now {
                break;
            }
            if let Some((_, toast)) = self.active.pop_front() {
                debug!(toast_id = toast.id, "Toast dismissed");
            }
        }
    }

    #[instrument(name = "toast_renderer", skip(self))]
    pub async fn run(mut self) {
        info!("ToastRenderer starting");

        loop {
            match self.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        maybe = self.receiver.recv() => match maybe {
                            Some(toast) => self.show(toast, Instant::now()),
                            None => break,
                        },
                        _ = sleep_until(deadline) => self.expire_due(Instant::now()),
                    }
                }
                None => match self.receiver.recv().await {
                    Some(toast) => self.show(toast, Instant::now()),
                    None => break,
                },
            }
        }

        info!("ToastRenderer stopped");
    }
}
