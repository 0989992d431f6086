//! Fixture reconciliation.

use client::GatewayClient;
use generator::DataGenerator;
use model::{FixtureDocument, RestaurantFixture, RestaurantId, SearchArea};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{ReconcileError, ReconcileResult};
use crate::store::FixtureStore;

/// What to do when the discovery listing fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPolicy {
    /// Log a warning and reconcile from an empty discovered set.
    #[default]
    BestEffort,
    /// Abort with [`ReconcileError::DiscoveryFailed`].
    Required,
}

/// Reconciliation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileConfig {
    /// Area listed to discover existing restaurants.
    pub discovery_area: SearchArea,

    pub discovery_policy: DiscoveryPolicy,

    /// Log progress after every this many registration attempts.
    pub progress_every: usize,

    /// Seed for the registration generator; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            discovery_area: SearchArea::discovery(),
            discovery_policy: DiscoveryPolicy::BestEffort,
            progress_every: 5,
            seed: None,
        }
    }
}

impl ReconcileConfig {
    /// Deterministic settings for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            progress_every: 1,
            seed: Some(0x5EED),
            ..Self::default()
        }
    }
}

/// Why a run stopped without persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    Unreachable,
    DiscoveryFailed,
    Empty,
    StoreFailed,
}

/// Reconciliation progress.
///
/// `Unstarted -> CheckingAvailability -> Discovering -> ToppingUp -> Persisted`;
/// any step may end in `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileState {
    Unstarted,
    CheckingAvailability,
    Discovering,
    ToppingUp,
    Persisted,
    Aborted(AbortReason),
}

impl ReconcileState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Persisted | Self::Aborted(_))
    }
}

/// Result of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Registered {
        attempt: usize,
        restaurant_id: RestaurantId,
        menu_items: usize,
    },
    Failed {
        attempt: usize,
        error: String,
    },
}

impl RegistrationOutcome {
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

/// Summary of a completed reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub target: usize,
    /// Usable restaurants found by discovery.
    pub discovered: usize,
    pub attempted: usize,
    pub registered: usize,
    pub failed: usize,
    /// Restaurants written to the fixture document.
    pub persisted: usize,
    pub outcomes: Vec<RegistrationOutcome>,
    pub state: ReconcileState,
}

/// Brings the fixture document up to a target number of usable restaurants.
///
/// Existing restaurants are discovered through the gateway and reused; only
/// the shortfall is registered. Registrations run one at a time.
#[derive(Debug)]
pub struct Reconciler<C> {
    client: C,
    store: FixtureStore,
    generator: DataGenerator,
    config: ReconcileConfig,
    state: ReconcileState,
}

impl<C: GatewayClient> Reconciler<C> {
    pub fn new(client: C, store: FixtureStore, config: ReconcileConfig) -> Self {
        Self {
            client,
            store,
            generator: DataGenerator::from_seed(config.seed),
            config,
            state: ReconcileState::Unstarted,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ReconcileState {
        self.state
    }

    #[must_use]
    pub const fn store(&self) -> &FixtureStore {
        &self.store
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Ensures at least `target_count` usable restaurants exist and persists
    /// them.
    ///
    /// The existing document is left untouched on any error.
    pub fn ensure_fixtures(&mut self, target_count: usize) -> ReconcileResult<ReconcileReport> {
        self.transition(ReconcileState::CheckingAvailability);
        if !self.client.health_check() {
            self.transition(ReconcileState::Aborted(AbortReason::Unreachable));
            return Err(ReconcileError::DependencyUnavailable);
        }

        self.transition(ReconcileState::Discovering);
        let mut fixtures = self.discover()?;
        let discovered = fixtures.len();

        self.transition(ReconcileState::ToppingUp);
        let needed = target_count.saturating_sub(discovered);
        info!(target_count, discovered, needed, "reconciling restaurant fixtures");
        let outcomes = self.top_up(needed, &mut fixtures);
        let registered = outcomes.iter().filter(|o| o.is_registered()).count();
        let failed = outcomes.len() - registered;

        if fixtures.is_empty() {
            self.transition(ReconcileState::Aborted(AbortReason::Empty));
            return Err(ReconcileError::NoFixturesAvailable {
                attempted: outcomes.len(),
                failed,
            });
        }

        let document = FixtureDocument::new(fixtures);
        if let Err(err) = self.store.save(&document) {
            self.transition(ReconcileState::Aborted(AbortReason::StoreFailed));
            return Err(err.into());
        }
        self.transition(ReconcileState::Persisted);
        info!(
            path = %self.store.path().display(),
            restaurants = document.len(),
            registered,
            failed,
            "fixture document written"
        );

        Ok(ReconcileReport {
            target: target_count,
            discovered,
            attempted: outcomes.len(),
            registered,
            failed,
            persisted: document.len(),
            outcomes,
            state: self.state,
        })
    }

    /// Listed restaurants that fail fixture validation are not counted.
    fn discover(&mut self) -> ReconcileResult<Vec<RestaurantFixture>> {
        match self.client.list_restaurants(&self.config.discovery_area) {
            Ok(listing) => {
                let listed = listing.restaurants.len();
                let fixtures: Vec<_> = listing
                    .restaurants
                    .into_iter()
                    .filter_map(|restaurant| RestaurantFixture::from_registered(restaurant).ok())
                    .collect();
                debug!(listed, usable = fixtures.len(), "discovered restaurants");
                Ok(fixtures)
            }
            Err(err) => match self.config.discovery_policy {
                DiscoveryPolicy::BestEffort => {
                    warn!(error = %err, "could not list existing restaurants, continuing with none");
                    Ok(Vec::new())
                }
                DiscoveryPolicy::Required => {
                    self.transition(ReconcileState::Aborted(AbortReason::DiscoveryFailed));
                    Err(ReconcileError::DiscoveryFailed { source: err })
                }
            },
        }
    }

    fn top_up(
        &mut self,
        needed: usize,
        fixtures: &mut Vec<RestaurantFixture>,
    ) -> Vec<RegistrationOutcome> {
        let progress_every = self.config.progress_every.max(1);
        let mut outcomes = Vec::with_capacity(needed);

        for attempt in 1..=needed {
            let registration = self.generator.generate_restaurant();
            let outcome = match self.client.register_restaurant(&registration) {
                Ok(restaurant) => match RestaurantFixture::from_registered(restaurant) {
                    Ok(fixture) => {
                        let outcome = RegistrationOutcome::Registered {
                            attempt,
                            restaurant_id: fixture.restaurant_id.clone(),
                            menu_items: fixture.menus.len(),
                        };
                        fixtures.push(fixture);
                        outcome
                    }
                    Err(err) => {
                        error!(attempt, error = %err, "registration returned an unusable restaurant");
                        RegistrationOutcome::Failed {
                            attempt,
                            error: format!("unusable response: {err}"),
                        }
                    }
                },
                Err(err) => {
                    error!(attempt, name = registration.name(), error = %err, "failed to register restaurant");
                    RegistrationOutcome::Failed {
                        attempt,
                        error: err.to_string(),
                    }
                }
            };
            outcomes.push(outcome);

            if attempt % progress_every == 0 {
                info!("seeded {attempt}/{needed} restaurants");
            }
        }
        outcomes
    }

    fn transition(&mut self, next: ReconcileState) {
        debug!(from = ?self.state, to = ?next, "reconcile state");
        self.state = next;
    }
}
