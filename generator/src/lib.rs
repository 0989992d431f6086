//! Schema-bound synthetic data generation for orderload.
//!
//! This crate produces payloads that always satisfy the gateway's input
//! contract:
//!
//! - Restaurant registrations with 5 to 10 menu entries inside a fixed
//!   bounding box
//! - Orders of 1 to 3 distinct menu items with quantities 1 to 5
//! - Search areas for listing restaurants
//!
//! # Design Principles
//!
//! - **Reproducible** - A seeded generator replays the same stream, text included.
//! - **Valid by construction** - Every bound lives in [`model::bounds`] and is
//!   checked by the payload constructors.
//! - **Loud preconditions** - An empty menu is a caller bug and is reported,
//!   never coerced.

mod error;
mod text;

use model::bounds::{
    round_to, COORDINATE_DECIMALS, LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN,
    MENU_ITEMS_MAX, MENU_ITEMS_MIN, ORDER_LINES_MAX, PRICE_DECIMALS, PRICE_MAX, PRICE_MIN,
    QUANTITY_MAX, QUANTITY_MIN,
};
use model::{
    CustomerId, MenuItem, MenuTemplate, ModelError, OrderLine, OrderRequest, RestaurantFixture,
    RestaurantId, RestaurantRegistration, SearchArea,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use error::{GenerateError, GenerateResult};
pub use model::bounds;

/// Generates restaurants and orders matching the gateway DTOs.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: ChaCha8Rng,
}

impl DataGenerator {
    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a deterministic generator.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from an optional seed.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Generates a registration matching `RegisterRestaurantDTO`.
    pub fn generate_restaurant(&mut self) -> RestaurantRegistration {
        let name = format!("{} Kitchen", text::company(&mut self.rng));
        let email = text::email(&mut self.rng);
        let secret_key = self.secret_key();
        let latitude = round_to(
            self.rng.gen_range(LATITUDE_MIN..=LATITUDE_MAX),
            COORDINATE_DECIMALS,
        );
        let longitude = round_to(
            self.rng.gen_range(LONGITUDE_MIN..=LONGITUDE_MAX),
            COORDINATE_DECIMALS,
        );
        let menu_len = self.rng.gen_range(MENU_ITEMS_MIN..=MENU_ITEMS_MAX);
        let menus = (0..menu_len).map(|_| self.menu_template()).collect();

        RestaurantRegistration::new(name, email, secret_key, latitude, longitude, menus)
            .expect("generated registration must satisfy bounds")
    }

    /// Generates an order matching `PlaceOrderDTO`.
    ///
    /// Picks `1..=min(3, menu_items.len())` distinct items and an independent
    /// quantity for each. An empty menu is rejected before any randomness is
    /// consumed.
    pub fn generate_order(
        &mut self,
        customer_id: &CustomerId,
        restaurant_id: &RestaurantId,
        menu_items: &[MenuItem],
    ) -> GenerateResult<OrderRequest> {
        if menu_items.is_empty() {
            return Err(GenerateError::InvalidInput {
                restaurant_id: restaurant_id.to_string(),
                reason: ModelError::EmptyMenu {
                    restaurant_id: restaurant_id.to_string(),
                },
            });
        }

        let max_lines = ORDER_LINES_MAX.min(menu_items.len());
        let count = self.rng.gen_range(1..=max_lines);
        let selected: Vec<&MenuItem> = menu_items.choose_multiple(&mut self.rng, count).collect();

        let invalid = |reason| GenerateError::InvalidInput {
            restaurant_id: restaurant_id.to_string(),
            reason,
        };
        let lines = selected
            .into_iter()
            .map(|item| {
                let quantity = self.rng.gen_range(QUANTITY_MIN..=QUANTITY_MAX);
                OrderLine::new(item.item_id.clone(), quantity)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        OrderRequest::new(customer_id.clone(), restaurant_id.clone(), lines).map_err(invalid)
    }

    /// Generates an order against a fixture.
    pub fn generate_order_for(
        &mut self,
        customer_id: &CustomerId,
        fixture: &RestaurantFixture,
    ) -> GenerateResult<OrderRequest> {
        self.generate_order(customer_id, &fixture.restaurant_id, &fixture.menus)
    }

    /// Search area matching `ListRestaurantsDTO` around the city centre.
    #[must_use]
    pub const fn generate_search_area(&self) -> SearchArea {
        SearchArea::city_centre()
    }

    /// Draws a value in `[low, high]` from the generator's stream.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    /// Picks an index in `0..len`; `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }

    fn menu_template(&mut self) -> MenuTemplate {
        let name = format!("{} Special", text::capitalize(text::word(&mut self.rng)));
        let description = text::sentence(&mut self.rng);
        let price = round_to(self.rng.gen_range(PRICE_MIN..=PRICE_MAX), PRICE_DECIMALS);
        MenuTemplate::new(name, description, price).expect("generated menu entry within bounds")
    }

    fn secret_key(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}
