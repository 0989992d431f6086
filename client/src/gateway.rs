//! The gateway contract consumed by the reconciler and the traffic driver.

use std::sync::Arc;

use model::{
    OrderRequest, RegisteredRestaurant, RestaurantListing, RestaurantRegistration, SearchArea,
};
use serde_json::Value;

use crate::error::ClientResult;

/// Readiness probe.
pub const HEALTH_PATH: &str = "/health";
/// Restaurant registration.
pub const REGISTER_PATH: &str = "/api/v1/restaurants/register";
/// Restaurant listing (POST with query parameters).
pub const LIST_PATH: &str = "/api/v1/restaurants";
/// Order placement.
pub const ORDERS_PATH: &str = "/api/v1/restaurants/orders";

/// Raw status and body of a call whose outcome the caller classifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` if the status is one of `accepted`.
    #[must_use]
    pub fn is_status_in(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status)
    }
}

/// Minimal capability surface of the API gateway.
///
/// Implementations hold no per-request state, so one instance may be shared
/// by every actor of a load run.
pub trait GatewayClient: Send + Sync {
    /// `true` iff the gateway answers its readiness probe with 200. Never fails.
    fn health_check(&self) -> bool;

    /// Registers a restaurant; the response carries the assigned identifiers.
    fn register_restaurant(
        &self,
        registration: &RestaurantRegistration,
    ) -> ClientResult<RegisteredRestaurant>;

    /// Lists restaurants around `area`.
    fn list_restaurants(&self, area: &SearchArea) -> ClientResult<RestaurantListing>;

    /// POSTs `payload` to `endpoint` and returns the parsed body; non-success
    /// statuses are errors.
    fn post(&self, endpoint: &str, payload: &Value) -> ClientResult<Value>;

    /// Submits an order and returns the raw response whatever its status.
    /// Only transport failures are errors.
    fn place_order(&self, order: &OrderRequest) -> ClientResult<ApiResponse>;
}

impl<T: GatewayClient + ?Sized> GatewayClient for &T {
    fn health_check(&self) -> bool {
        (**self).health_check()
    }

    fn register_restaurant(
        &self,
        registration: &RestaurantRegistration,
    ) -> ClientResult<RegisteredRestaurant> {
        (**self).register_restaurant(registration)
    }

    fn list_restaurants(&self, area: &SearchArea) -> ClientResult<RestaurantListing> {
        (**self).list_restaurants(area)
    }

    fn post(&self, endpoint: &str, payload: &Value) -> ClientResult<Value> {
        (**self).post(endpoint, payload)
    }

    fn place_order(&self, order: &OrderRequest) -> ClientResult<ApiResponse> {
        (**self).place_order(order)
    }
}

impl<T: GatewayClient + ?Sized> GatewayClient for Arc<T> {
    fn health_check(&self) -> bool {
        (**self).health_check()
    }

    fn register_restaurant(
        &self,
        registration: &RestaurantRegistration,
    ) -> ClientResult<RegisteredRestaurant> {
        (**self).register_restaurant(registration)
    }

    fn list_restaurants(&self, area: &SearchArea) -> ClientResult<RestaurantListing> {
        (**self).list_restaurants(area)
    }

    fn post(&self, endpoint: &str, payload: &Value) -> ClientResult<Value> {
        (**self).post(endpoint, payload)
    }

    fn place_order(&self, order: &OrderRequest) -> ClientResult<ApiResponse> {
        (**self).place_order(order)
    }
}
