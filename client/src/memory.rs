//! In-memory gateway for tests and dry runs.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use model::{
    ItemId, MenuItem, OrderRequest, RegisteredRestaurant, RestaurantId, RestaurantListing,
    RestaurantRegistration, SearchArea,
};
use serde_json::{json, Value};

use crate::error::{ClientError, ClientResult};
use crate::gateway::{ApiResponse, GatewayClient, ORDERS_PATH, REGISTER_PATH};

/// A gateway that keeps restaurants in memory and records every call.
///
/// Registration attempts are numbered from zero; attempts listed through
/// [`MemoryGateway::fail_registration_attempts`] answer 500.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    healthy: bool,
    listing_fails: bool,
    strip_registered_menus: bool,
    failing_attempts: BTreeSet<usize>,
    order_status_override: Option<u16>,
    restaurants: Vec<RegisteredRestaurant>,
    registration_attempts: usize,
    list_calls: usize,
    next_id: u64,
    orders: Vec<Value>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            healthy: true,
            listing_fails: false,
            strip_registered_menus: false,
            failing_attempts: BTreeSet::new(),
            order_status_override: None,
            restaurants: Vec::new(),
            registration_attempts: 0,
            list_calls: 0,
            next_id: 1,
            orders: Vec::new(),
        }
    }
}

impl MemoryGateway {
    /// A healthy gateway with no restaurants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A healthy gateway pre-populated with `restaurants`.
    #[must_use]
    pub fn with_restaurants(restaurants: Vec<RegisteredRestaurant>) -> Self {
        let gateway = Self::new();
        gateway.lock().restaurants = restaurants;
        gateway
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Controls the readiness probe.
    pub fn set_healthy(&self, healthy: bool) {
        self.lock().healthy = healthy;
    }

    /// Makes every listing call fail with 503.
    pub fn fail_listing(&self, fails: bool) {
        self.lock().listing_fails = fails;
    }

    /// Makes the given zero-based registration attempts fail with 500.
    pub fn fail_registration_attempts(&self, attempts: impl IntoIterator<Item = usize>) {
        self.lock().failing_attempts.extend(attempts);
    }

    /// Makes successful registrations answer with an empty menu.
    pub fn strip_registered_menus(&self, strip: bool) {
        self.lock().strip_registered_menus = strip;
    }

    /// Forces every order to answer with `status`.
    pub fn set_order_status(&self, status: Option<u16>) {
        self.lock().order_status_override = status;
    }

    /// Seeds a restaurant with `items` menu entries and returns it.
    pub fn seed_restaurant(&self, items: usize) -> RegisteredRestaurant {
        let mut state = self.lock();
        let restaurant = state.allocate_restaurant(
            "Seeded Kitchen",
            "seeded@example.com",
            (0..items).map(|idx| (format!("Dish{idx} Special"), String::new(), 100.0)),
        );
        state.restaurants.push(restaurant.clone());
        restaurant
    }

    pub fn registration_attempts(&self) -> usize {
        self.lock().registration_attempts
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub fn restaurants(&self) -> Vec<RegisteredRestaurant> {
        self.lock().restaurants.clone()
    }

    /// Bodies of every order received, accepted or not.
    pub fn orders(&self) -> Vec<Value> {
        self.lock().orders.clone()
    }
}

impl MemoryState {
    fn allocate_restaurant(
        &mut self,
        name: &str,
        email: &str,
        menu: impl Iterator<Item = (String, String, f64)>,
    ) -> RegisteredRestaurant {
        let id = self.next_id;
        self.next_id += 1;
        let restaurant_id = format!("restaurant-{id}");
        let menus = menu
            .enumerate()
            .map(|(idx, (name, description, price))| MenuItem {
                item_id: ItemId::new(format!("{restaurant_id}-item-{idx}"))
                    .expect("generated item id must be non-blank"),
                name,
                description,
                price,
            })
            .collect();
        RegisteredRestaurant {
            restaurant_id: RestaurantId::new(restaurant_id)
                .expect("generated restaurant id must be non-blank"),
            name: name.to_string(),
            email: email.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            menus,
        }
    }

    fn order_response(&self, body: &Value) -> ApiResponse {
        if let Some(status) = self.order_status_override {
            return ApiResponse::new(status, json!({"error": "forced status"}).to_string());
        }
        let restaurant = body["restaurant_id"]
            .as_str()
            .and_then(|id| self.restaurants.iter().find(|r| r.restaurant_id.as_str() == id));
        let Some(restaurant) = restaurant else {
            return ApiResponse::new(500, json!({"error": "Restaurant not found"}).to_string());
        };
        let Some(items) = body["items"].as_array().filter(|items| !items.is_empty()) else {
            return ApiResponse::new(400, json!({"error": "Invalid request"}).to_string());
        };

        let mut total = 0.0;
        for line in items {
            let item = line["item_id"]
                .as_str()
                .and_then(|id| restaurant.menus.iter().find(|m| m.item_id.as_str() == id));
            let quantity = line["quantity"].as_f64().unwrap_or(0.0);
            match item {
                Some(item) if quantity >= 1.0 => total += item.price * quantity,
                _ => {
                    return ApiResponse::new(
                        500,
                        json!({"error": "Invalid order data provided"}).to_string(),
                    )
                }
            }
        }

        let order_id = format!("order-{}", self.orders.len());
        ApiResponse::new(
            201,
            json!({"order_id": order_id, "total_amount": total, "status": "PENDING"}).to_string(),
        )
    }
}

impl GatewayClient for MemoryGateway {
    fn health_check(&self) -> bool {
        self.lock().healthy
    }

    fn register_restaurant(
        &self,
        registration: &RestaurantRegistration,
    ) -> ClientResult<RegisteredRestaurant> {
        let mut state = self.lock();
        let attempt = state.registration_attempts;
        state.registration_attempts += 1;
        if state.failing_attempts.contains(&attempt) {
            return Err(ClientError::Status {
                status: 500,
                body: json!({"error": "Failed to create restaurant"}).to_string(),
            });
        }

        let menu = registration.menus().iter().map(|template| {
            (
                template.name().to_string(),
                template.description().to_string(),
                template.price(),
            )
        });
        let mut restaurant =
            state.allocate_restaurant(registration.name(), registration.email(), menu);
        restaurant.latitude = registration.latitude();
        restaurant.longitude = registration.longitude();
        if state.strip_registered_menus {
            restaurant.menus.clear();
        }
        state.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    fn list_restaurants(&self, _area: &SearchArea) -> ClientResult<RestaurantListing> {
        let mut state = self.lock();
        state.list_calls += 1;
        if state.listing_fails {
            return Err(ClientError::Status {
                status: 503,
                body: json!({"error": "restaurant service unavailable"}).to_string(),
            });
        }
        Ok(RestaurantListing {
            restaurants: state.restaurants.clone(),
        })
    }

    fn post(&self, endpoint: &str, payload: &Value) -> ClientResult<Value> {
        match endpoint {
            ORDERS_PATH => {
                let mut state = self.lock();
                let response = state.order_response(payload);
                state.orders.push(payload.clone());
                if !(200..300).contains(&response.status) {
                    return Err(ClientError::Status {
                        status: response.status,
                        body: response.body,
                    });
                }
                Ok(serde_json::from_str(&response.body)?)
            }
            REGISTER_PATH => Err(ClientError::Status {
                status: 400,
                body: json!({"error": "use register_restaurant"}).to_string(),
            }),
            _ => Err(ClientError::Status {
                status: 404,
                body: "404 page not found".to_string(),
            }),
        }
    }

    fn place_order(&self, order: &OrderRequest) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(order)?;
        let mut state = self.lock();
        let response = state.order_response(&body);
        state.orders.push(body);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::CustomerId;

    #[test]
    fn seeded_restaurants_are_listed() {
        let gateway = MemoryGateway::new();
        gateway.seed_restaurant(3);
        gateway.seed_restaurant(0);
        let listing = gateway.list_restaurants(&SearchArea::discovery()).unwrap();
        assert_eq!(listing.restaurants.len(), 2);
        assert_eq!(listing.restaurants[0].menus.len(), 3);
        assert!(listing.restaurants[1].menus.is_empty());
        assert_eq!(gateway.list_calls(), 1);
    }

    #[test]
    fn prepopulated_restaurants_are_orderable() {
        let seeded = MemoryGateway::new().seed_restaurant(2);
        let gateway = MemoryGateway::with_restaurants(vec![seeded.clone()]);
        assert_eq!(gateway.restaurants(), vec![seeded.clone()]);

        let body = json!({
            "restaurant_id": seeded.restaurant_id.as_str(),
            "items": [{"item_id": seeded.menus[0].item_id.as_str(), "quantity": 1}],
        });
        assert!(gateway.post(ORDERS_PATH, &body).is_ok());
    }

    #[test]
    fn listing_failure_is_status_error() {
        let gateway = MemoryGateway::new();
        gateway.fail_listing(true);
        let err = gateway
            .list_restaurants(&SearchArea::discovery())
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn order_for_known_items_is_created() {
        let gateway = MemoryGateway::new();
        let restaurant = gateway.seed_restaurant(2);
        let order = OrderRequest::new(
            CustomerId::new("c").unwrap(),
            restaurant.restaurant_id.clone(),
            vec![model::OrderLine::new(restaurant.menus[1].item_id.clone(), 2).unwrap()],
        )
        .unwrap();
        let response = gateway.place_order(&order).unwrap();
        assert_eq!(response.status, 201);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["total_amount"], 200.0);
        assert_eq!(gateway.orders().len(), 1);
    }

    #[test]
    fn order_for_unknown_restaurant_fails() {
        let gateway = MemoryGateway::new();
        let response = gateway
            .post(ORDERS_PATH, &json!({"restaurant_id": "missing", "items": []}))
            .unwrap_err();
        assert_eq!(response.status(), Some(500));
    }

    #[test]
    fn forced_status_applies_to_orders() {
        let gateway = MemoryGateway::new();
        gateway.set_order_status(Some(429));
        let body = json!({"restaurant_id": "any", "items": [{"item_id": "x", "quantity": 1}]});
        let err = gateway.post(ORDERS_PATH, &body).unwrap_err();
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn unknown_endpoint_is_not_found() {
        let gateway = MemoryGateway::new();
        let err = gateway.post("/api/v1/nope", &json!({})).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
