//! Reconciliation and store errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use client::ClientError;

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Result type for fixture store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Run-level reconciliation failures. Per-registration failures are never
/// raised; they are recorded as [`crate::RegistrationOutcome::Failed`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ReconcileError {
    /// The gateway did not answer its readiness probe.
    DependencyUnavailable,

    /// Discovery found nothing usable and every registration failed.
    NoFixturesAvailable { attempted: usize, failed: usize },

    /// Listing failed under [`crate::DiscoveryPolicy::Required`].
    DiscoveryFailed { source: ClientError },

    /// The fixture document could not be persisted.
    Store(StoreError),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyUnavailable => {
                write!(f, "gateway is not available: health check failed")
            }
            Self::NoFixturesAvailable { attempted, failed } => write!(
                f,
                "no usable fixtures: nothing discovered and {failed} of {attempted} registrations failed"
            ),
            Self::DiscoveryFailed { source } => write!(f, "restaurant discovery failed: {source}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DiscoveryFailed { source } => Some(source),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ReconcileError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Fixture document persistence failures.
#[derive(Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Filesystem access failed.
    Io { path: PathBuf, source: io::Error },

    /// The document on disk is not a valid fixture document.
    Malformed { path: PathBuf, message: String },

    /// The document could not be encoded.
    Encode { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Malformed { path, message } => {
                write!(f, "malformed fixture document {}: {message}", path.display())
            }
            Self::Encode { message } => write!(f, "failed to encode fixture document: {message}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
