use std::{sync::Arc, time::Duration};

use crate::application::repos::PostStore;

#[derive(Clone)]
pub struct AdminPostService {
    pub(crate) store: Arc<dyn PostStore>,
    pub(crate) simulated_latency: Duration,
}

impl AdminPostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Delay every write by `latency` before processing it. Development aid
    /// for exercising the pending state of the forms; zero disables it.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub(crate) async fn simulate_latency(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}
