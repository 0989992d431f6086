//! Traffic driver and per-user actors.

use std::sync::Arc;
use std::time::Duration;

use client::GatewayClient;
use generator::DataGenerator;
use model::{CustomerId, FixtureDocument, RestaurantFixture};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DriverConfig;

/// Classified result of one order attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
    Success {
        status: u16,
    },
    /// Non-success status, or no status at all for a transport failure.
    Failure {
        status: Option<u16>,
        body: String,
    },
    /// No usable fixture or no buildable order; nothing was sent.
    Skipped,
}

impl OrderOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status } => Some(*status),
            Self::Failure { status, .. } => *status,
            Self::Skipped => None,
        }
    }
}

/// Owns the fixture set and client for a load run.
///
/// The fixture set is fixed at construction and shared read-only by every
/// actor.
#[derive(Debug)]
pub struct TrafficDriver<C> {
    fixtures: Arc<[RestaurantFixture]>,
    client: C,
    config: DriverConfig,
}

impl<C: GatewayClient> TrafficDriver<C> {
    /// Creates a driver over the usable fixtures of `document`.
    pub fn new(document: FixtureDocument, client: C, config: DriverConfig) -> Self {
        let total = document.len();
        let fixtures: Arc<[RestaurantFixture]> = document
            .restaurants
            .into_iter()
            .filter(|fixture| fixture.validate().is_ok())
            .collect();
        if fixtures.len() < total {
            warn!(
                dropped = total - fixtures.len(),
                "ignoring fixtures that fail validation"
            );
        }
        Self {
            fixtures,
            client,
            config,
        }
    }

    #[must_use]
    pub fn fixtures(&self) -> &[RestaurantFixture] {
        &self.fixtures
    }

    #[must_use]
    pub fn has_fixtures(&self) -> bool {
        !self.fixtures.is_empty()
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Creates the actor for simulated user `index`.
    pub fn actor(&self, index: usize) -> Actor<'_, C> {
        Actor {
            index,
            fixtures: Arc::clone(&self.fixtures),
            client: &self.client,
            customer_id: self.config.customer_id.clone(),
            success_statuses: &self.config.success_statuses,
            generator: DataGenerator::from_seed(self.config.actor_seed(index)),
        }
    }
}

/// One simulated user with its own generator.
#[derive(Debug)]
pub struct Actor<'a, C> {
    index: usize,
    fixtures: Arc<[RestaurantFixture]>,
    client: &'a C,
    customer_id: CustomerId,
    success_statuses: &'a [u16],
    generator: DataGenerator,
}

impl<C: GatewayClient> Actor<'_, C> {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Orders from a random fixture and classifies the response.
    pub fn place_order(&mut self) -> OrderOutcome {
        let Some(pick) = self.generator.index(self.fixtures.len()) else {
            return OrderOutcome::Skipped;
        };
        let fixture = &self.fixtures[pick];

        let order = match self.generator.generate_order_for(&self.customer_id, fixture) {
            Ok(order) => order,
            Err(err) => {
                warn!(actor = self.index, error = %err, "could not build order, nothing sent");
                return OrderOutcome::Skipped;
            }
        };

        match self.client.place_order(&order) {
            Ok(response) if response.is_status_in(self.success_statuses) => {
                OrderOutcome::Success {
                    status: response.status,
                }
            }
            Ok(response) => {
                debug!(
                    actor = self.index,
                    status = response.status,
                    body = %response.body,
                    "order rejected"
                );
                OrderOutcome::Failure {
                    status: Some(response.status),
                    body: response.body,
                }
            }
            Err(err) => {
                debug!(actor = self.index, error = %err, "order not delivered");
                OrderOutcome::Failure {
                    status: err.status(),
                    body: err.to_string(),
                }
            }
        }
    }

    /// Draws a think time in `[min, max]`.
    pub fn next_wait(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        Duration::from_secs_f64(
            self.generator
                .uniform(min.as_secs_f64(), max.as_secs_f64()),
        )
    }
}
