//! Order traffic generation for orderload.
//!
//! This crate provides:
//! - [`TrafficDriver`], which owns a read-only fixture set and a gateway client
//! - [`Actor`], one simulated user placing generated orders
//! - [`run_actors`], a thread-per-actor harness with think time
//! - [`RunSummary`], status distribution, latency percentiles and budgets
//!
//! # Design Principles
//!
//! - **Fixtures are an input** - The set is passed in once and never reloaded.
//! - **Failures are outcomes** - Rejected and undelivered orders are recorded,
//!   never retried or raised.
//! - **Reproducible** - A base seed fixes every actor's order stream.

mod config;
mod driver;
mod error;
mod harness;
mod summary;

pub use config::{DriverConfig, LoadConfig, DEFAULT_CUSTOMER_ID, DEFAULT_SUCCESS_STATUSES};
pub use driver::{Actor, OrderOutcome, TrafficDriver};
pub use error::{DriverError, DriverResult};
pub use harness::run_actors;
pub use summary::RunSummary;
