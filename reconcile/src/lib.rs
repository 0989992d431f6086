//! Fixture reconciliation for orderload.
//!
//! This crate provides:
//! - [`Reconciler`], which discovers existing restaurants, registers only the
//!   shortfall and persists the result
//! - [`FixtureStore`], the YAML fixture document on disk
//! - Per-attempt [`RegistrationOutcome`]s and a serializable [`ReconcileReport`]
//!
//! # Design Principles
//!
//! - **Idempotent** - Running twice with the same target registers nothing the
//!   second time.
//! - **All or nothing on disk** - The document is replaced atomically and only
//!   after a successful run.
//! - **Failures are data** - A failed registration is an outcome, not an abort.

mod error;
mod reconciler;
pub mod store;

pub use error::{ReconcileError, ReconcileResult, StoreError, StoreResult};
pub use reconciler::{
    AbortReason, DiscoveryPolicy, ReconcileConfig, ReconcileReport, ReconcileState, Reconciler,
    RegistrationOutcome,
};
pub use store::{FixtureStore, DEFAULT_FIXTURE_PATH};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = ReconcileConfig::default();
        let _ = ReconcileConfig::for_testing();
        let _ = FixtureStore::default();
        let _ = DiscoveryPolicy::default();
        let _ = ReconcileState::Unstarted;

        // Error types
        let _: ReconcileResult<()> = Ok(());
        let _: StoreResult<()> = Ok(());
    }
}
