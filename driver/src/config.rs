//! Driver and load-run configuration.

use std::time::Duration;

use model::CustomerId;

use crate::error::{DriverError, DriverResult};

/// Customer every actor orders as unless configured otherwise.
pub const DEFAULT_CUSTOMER_ID: &str = "46b0302c-b7fb-4ee9-ba67-58cbe868be4c";

/// Statuses counted as a successful order.
pub const DEFAULT_SUCCESS_STATUSES: [u16; 2] = [200, 201];

/// Per-order behavior shared by every actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub customer_id: CustomerId,

    /// Response statuses classified as success.
    pub success_statuses: Vec<u16>,

    /// Base seed; actor `i` uses `seed + i`. Entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            customer_id: default_customer(),
            success_statuses: DEFAULT_SUCCESS_STATUSES.to_vec(),
            seed: None,
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Seed for actor `index`.
    #[must_use]
    pub fn actor_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index as u64))
    }
}

fn default_customer() -> CustomerId {
    CustomerId::new(DEFAULT_CUSTOMER_ID).expect("default customer id must be non-blank")
}

/// Shape of a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Number of concurrent actors.
    pub users: usize,

    /// Wall-clock bound on the run.
    pub duration: Duration,

    /// Optional cap on orders per actor.
    pub max_requests_per_user: Option<usize>,

    /// Think time between orders is uniform in `[min_wait, max_wait]`.
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            users: 10,
            duration: Duration::from_secs(60),
            max_requests_per_user: None,
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(2),
        }
    }
}

impl LoadConfig {
    /// A short run with no think time, capped per actor.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            users: 2,
            duration: Duration::from_secs(30),
            max_requests_per_user: Some(5),
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
        }
    }

    pub fn validate(&self) -> DriverResult<()> {
        if self.users == 0 {
            return Err(DriverError::InvalidConfig {
                message: "users must be at least 1".to_string(),
            });
        }
        if self.min_wait > self.max_wait {
            return Err(DriverError::InvalidConfig {
                message: format!(
                    "min wait {:?} exceeds max wait {:?}",
                    self.min_wait, self.max_wait
                ),
            });
        }
        Ok(())
    }
}
