//! Gateway client contract for orderload.
//!
//! This crate provides:
//! - [`GatewayClient`], the capability surface consumed by the reconciler and
//!   the traffic driver
//! - [`HttpGatewayClient`], a blocking reqwest implementation
//! - [`MemoryGateway`], an in-memory gateway for tests and dry runs
//!
//! # Design Principles
//!
//! - **Errors carry the body** - A non-success status keeps the response body
//!   so callers can log it verbatim.
//! - **Shareable** - Clients hold no per-request state and are `Send + Sync`.
//! - **Bounded** - Every call runs under a configured timeout.

mod config;
mod error;
mod gateway;
mod http;
mod memory;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use gateway::{
    ApiResponse, GatewayClient, HEALTH_PATH, LIST_PATH, ORDERS_PATH, REGISTER_PATH,
};
pub use http::HttpGatewayClient;
pub use memory::MemoryGateway;
