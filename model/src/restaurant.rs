//! Restaurant payloads: registration requests, gateway responses, fixtures.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bounds::{
    LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN, MENU_ITEMS_MAX, MENU_ITEMS_MIN,
};
use crate::error::{ModelError, ModelResult};
use crate::{MenuItem, MenuTemplate, RestaurantId};

/// Body of `POST /api/v1/restaurants/register`.
///
/// Construction enforces the generation bounds, so a registration that exists
/// is always accepted by the gateway's DTO validation and yields a usable
/// fixture once registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRegistration {
    name: String,
    email: String,
    secret_key: String,
    latitude: f64,
    longitude: f64,
    menus: Vec<MenuTemplate>,
}

impl RestaurantRegistration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        secret_key: impl Into<String>,
        latitude: f64,
        longitude: f64,
        menus: Vec<MenuTemplate>,
    ) -> ModelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier { field: "name" });
        }
        let email = email.into();
        if !is_plausible_email(&email) {
            return Err(ModelError::InvalidEmail { email });
        }
        let secret_key = secret_key.into();
        if uuid::Uuid::parse_str(&secret_key).is_err() {
            return Err(ModelError::InvalidSecretKey { secret_key });
        }
        if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude) {
            return Err(ModelError::LatitudeOutOfRange {
                latitude,
                min: LATITUDE_MIN,
                max: LATITUDE_MAX,
            });
        }
        if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude) {
            return Err(ModelError::LongitudeOutOfRange {
                longitude,
                min: LONGITUDE_MIN,
                max: LONGITUDE_MAX,
            });
        }
        if !(MENU_ITEMS_MIN..=MENU_ITEMS_MAX).contains(&menus.len()) {
            return Err(ModelError::MenuSizeOutOfRange {
                len: menus.len(),
                min: MENU_ITEMS_MIN,
                max: MENU_ITEMS_MAX,
            });
        }
        Ok(Self {
            name,
            email,
            secret_key,
            latitude,
            longitude,
            menus,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn menus(&self) -> &[MenuTemplate] {
        &self.menus
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}

/// A restaurant as returned by the gateway (registration response or listing entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredRestaurant {
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub menus: Vec<MenuItem>,
}

/// Response of the restaurant listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantListing {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub restaurants: Vec<RegisteredRestaurant>,
}

// The gateway marshals a nil slice as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A persisted, reusable restaurant with its gateway-assigned menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantFixture {
    pub restaurant_id: RestaurantId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub menus: Vec<MenuItem>,
}

impl RestaurantFixture {
    /// Creates a usable fixture; an empty menu is rejected.
    pub fn new(restaurant_id: RestaurantId, menus: Vec<MenuItem>) -> ModelResult<Self> {
        let fixture = Self {
            restaurant_id,
            menus,
        };
        fixture.validate()?;
        Ok(fixture)
    }

    /// Builds a fixture from a gateway response. The response is authoritative
    /// for identifiers, so nothing from the request payload is reused.
    pub fn from_registered(restaurant: RegisteredRestaurant) -> ModelResult<Self> {
        Self::new(restaurant.restaurant_id, restaurant.menus)
    }

    /// A fixture is usable iff it has at least one menu item.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.menus.is_empty()
    }

    /// Checks usability and every menu item.
    ///
    /// Item ids must be distinct: an order may reference each item once, so a
    /// menu with repeated ids cannot always produce a valid order.
    pub fn validate(&self) -> ModelResult<()> {
        if self.restaurant_id.is_blank() {
            return Err(ModelError::EmptyIdentifier {
                field: "restaurant_id",
            });
        }
        if !self.is_usable() {
            return Err(ModelError::EmptyMenu {
                restaurant_id: self.restaurant_id.to_string(),
            });
        }
        let mut seen = HashSet::with_capacity(self.menus.len());
        for item in &self.menus {
            item.validate()?;
            if !seen.insert(item.item_id.as_str()) {
                return Err(ModelError::DuplicateMenuItem {
                    restaurant_id: self.restaurant_id.to_string(),
                    item_id: item.item_id.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The persisted fixture set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub restaurants: Vec<RestaurantFixture>,
}

impl FixtureDocument {
    #[must_use]
    pub const fn new(restaurants: Vec<RestaurantFixture>) -> Self {
        Self { restaurants }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Iterates fixtures that pass validation.
    pub fn usable(&self) -> impl Iterator<Item = &RestaurantFixture> {
        self.restaurants
            .iter()
            .filter(|fixture| fixture.validate().is_ok())
    }

    /// Drops every fixture that fails validation, returning how many were removed.
    pub fn retain_usable(&mut self) -> usize {
        let before = self.restaurants.len();
        self.restaurants.retain(|fixture| fixture.validate().is_ok());
        before - self.restaurants.len()
    }

    /// Total number of menu items across all fixtures.
    #[must_use]
    pub fn menu_item_count(&self) -> usize {
        self.restaurants.iter().map(|r| r.menus.len()).sum()
    }
}
