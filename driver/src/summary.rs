//! Load run summary.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::driver::OrderOutcome;
use crate::error::{DriverError, DriverResult};

/// Aggregated outcomes of a load run, written as `summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub users: usize,
    pub elapsed_ms: u64,
    /// Orders actually sent.
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    /// Failures that never produced a status.
    pub transport_failures: u64,
    pub skipped: u64,
    /// Count per response status.
    pub status_counts: BTreeMap<u16, u64>,
    pub avg_latency_ms: u64,
    pub p95_latency_ms: u64,
    /// `failures / requests`; zero when nothing was sent.
    pub error_rate: f64,
    #[serde(skip)]
    latencies_ms: Vec<u64>,
}

impl RunSummary {
    #[must_use]
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// Records one attempt. Skips carry no latency.
    pub fn record(&mut self, outcome: &OrderOutcome, latency: Duration) {
        match outcome {
            OrderOutcome::Skipped => {
                self.skipped += 1;
                return;
            }
            OrderOutcome::Success { .. } => self.successes += 1,
            OrderOutcome::Failure { status, .. } => {
                self.failures += 1;
                if status.is_none() {
                    self.transport_failures += 1;
                }
            }
        }
        self.requests += 1;
        if let Some(status) = outcome.status() {
            *self.status_counts.entry(status).or_insert(0) += 1;
        }
        self.latencies_ms
            .push(u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
    }

    /// Computes the derived figures.
    #[allow(clippy::cast_precision_loss)]
    pub fn finalize(&mut self, elapsed: Duration) {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if self.requests > 0 {
            self.error_rate = self.failures as f64 / self.requests as f64;
        }
        if !self.latencies_ms.is_empty() {
            let total: u64 = self.latencies_ms.iter().sum();
            self.avg_latency_ms = total / self.latencies_ms.len() as u64;
            self.p95_latency_ms = p95(&mut self.latencies_ms);
        }
    }

    /// Fails when the error rate or p95 latency exceeds its budget.
    #[allow(clippy::cast_precision_loss)]
    pub fn assert_budgets(
        &self,
        max_error_rate: Option<f64>,
        max_p95_ms: Option<u64>,
    ) -> DriverResult<()> {
        if let Some(max_error_rate) = max_error_rate {
            if self.error_rate > max_error_rate {
                return Err(DriverError::BudgetExceeded {
                    metric: "error rate",
                    value: self.error_rate,
                    budget: max_error_rate,
                });
            }
        }
        if let Some(max_p95_ms) = max_p95_ms {
            if self.p95_latency_ms > max_p95_ms {
                return Err(DriverError::BudgetExceeded {
                    metric: "p95 latency ms",
                    value: self.p95_latency_ms as f64,
                    budget: max_p95_ms as f64,
                });
            }
        }
        Ok(())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn p95(values: &mut [u64]) -> u64 {
    values.sort_unstable();
    let idx = ((values.len() as f64) * 0.95).ceil() as usize;
    let idx = idx.saturating_sub(1).min(values.len() - 1);
    values[idx]
}
