//! Mock payment processing.
//!
//! There is no payment gateway. Processing sleeps for the configured delay
//! to simulate a round trip, then always succeeds with a demo transaction
//! id. The delay is tracked through diagnostics so a leaked or runaway
//! payment task is visible in the shutdown report.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::instrument;

use crate::diagnostics::Diagnostics;
use crate::services::checkout::Order;

/// Outcome of a simulated payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Demo transaction id (e.g., `DEMO-042917`).
    pub transaction_id: String,
    pub message: String,
}

/// Always-succeeding payment processor with a simulated processing time.
#[derive(Debug, Clone)]
pub struct PaymentProcessor {
    delay: Duration,
}

impl PaymentProcessor {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Simulate processing a payment for `order`.
    ///
    /// Sleeps for the configured delay and returns a successful receipt.
    #[instrument(skip(self, order, diagnostics), fields(order_number = %order.number, total = %order.total))]
    pub async fn process(&self, order: &Order, diagnostics: &Arc<Diagnostics>) -> PaymentReceipt {
        tracing::info!("processing payment");

        {
            let _timer = diagnostics.timer_guard(self.delay);
            tokio::time::sleep(self.delay).await;
        }

        let n: u32 = rand::rng().random_range(0..1_000_000);
        let receipt = PaymentReceipt {
            transaction_id: format!("DEMO-{n:06}"),
            message: "Payment processed successfully".to_string(),
        };

        tracing::info!(transaction_id = %receipt.transaction_id, "payment processed");
        receipt
    }
}
