//! Typed payloads for the restaurant/menu/order API exercised by orderload.
//!
//! This crate defines every value that crosses the gateway boundary or lands
//! in the fixture document:
//! - Registration requests and menu templates (generated)
//! - Registered restaurants and listings (gateway responses)
//! - Restaurant fixtures and the persisted fixture document
//! - Order requests and search areas
//!
//! # Design Principles
//!
//! - **Validate on construction** - Out-of-range values are rejected when a
//!   payload is built, not when the gateway answers 400.
//! - **Gateway is authoritative** - Identifiers are opaque and only ever come
//!   from gateway responses.
//! - **Usable by construction** - A fixture built through [`RestaurantFixture::new`]
//!   always has at least one menu item.

pub mod bounds;
mod area;
mod error;
mod ids;
mod menu;
mod order;
mod restaurant;

pub use area::SearchArea;
pub use error::{ModelError, ModelResult};
pub use ids::{CustomerId, ItemId, RestaurantId};
pub use menu::{MenuItem, MenuTemplate};
pub use order::{OrderLine, OrderRequest};
pub use restaurant::{
    FixtureDocument, RegisteredRestaurant, RestaurantFixture, RestaurantListing,
    RestaurantRegistration,
};
