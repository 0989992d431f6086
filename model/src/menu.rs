//! Menu entries: gateway-assigned items and generated templates.

use serde::{Deserialize, Serialize};

use crate::bounds::{has_decimals, PRICE_DECIMALS, PRICE_MAX, PRICE_MIN};
use crate::error::{ModelError, ModelResult};
use crate::ItemId;

/// A menu item as stored by the gateway.
///
/// Instances read from the gateway or a fixture document are trusted for shape
/// only; call [`MenuItem::validate`] before relying on the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

impl MenuItem {
    /// Creates a menu item after checking the price.
    pub fn new(
        item_id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> ModelResult<Self> {
        let item = Self {
            item_id,
            name: name.into(),
            description: description.into(),
            price,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the identifier and price invariants.
    pub fn validate(&self) -> ModelResult<()> {
        if self.item_id.is_blank() {
            return Err(ModelError::EmptyIdentifier { field: "item_id" });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::NegativePrice { price: self.price });
        }
        Ok(())
    }
}

/// A menu entry sent with a registration request; the gateway assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuTemplate {
    name: String,
    description: String,
    price: f64,
}

impl MenuTemplate {
    /// Creates a template whose price lies in the generated band with two decimals.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> ModelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier { field: "menu name" });
        }
        if !(PRICE_MIN..=PRICE_MAX).contains(&price) {
            return Err(ModelError::PriceOutOfRange {
                price,
                min: PRICE_MIN,
                max: PRICE_MAX,
            });
        }
        if !has_decimals(price, PRICE_DECIMALS) {
            return Err(ModelError::PricePrecision { price });
        }
        Ok(Self {
            name,
            description: description.into(),
            price,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn menu_item_rejects_negative_price() {
        let err = MenuItem::new(item_id("a"), "Tibs", "", -1.0).unwrap_err();
        assert_eq!(err, ModelError::NegativePrice { price: -1.0 });
    }

    #[test]
    fn menu_item_rejects_nan_price() {
        assert!(MenuItem::new(item_id("a"), "Tibs", "", f64::NAN).is_err());
    }

    #[test]
    fn menu_item_allows_free_items() {
        let item = MenuItem::new(item_id("a"), "Water", "tap", 0.0).unwrap();
        assert!(item.price.abs() < f64::EPSILON);
    }

    #[test]
    fn menu_item_missing_fields_default() {
        let item: MenuItem = serde_json::from_str(r#"{"item_id":"x"}"#).unwrap();
        assert_eq!(item.name, "");
        assert!(item.validate().is_ok());
    }

    #[test]
    fn template_bounds() {
        assert!(MenuTemplate::new("Shiro Special", "", 50.0).is_ok());
        assert!(MenuTemplate::new("Shiro Special", "", 500.0).is_ok());
        assert!(matches!(
            MenuTemplate::new("Shiro Special", "", 49.99),
            Err(ModelError::PriceOutOfRange { .. })
        ));
        assert!(matches!(
            MenuTemplate::new("Shiro Special", "", 500.01),
            Err(ModelError::PriceOutOfRange { .. })
        ));
    }

    #[test]
    fn template_rejects_three_decimals() {
        assert_eq!(
            MenuTemplate::new("Shiro Special", "", 120.125).unwrap_err(),
            ModelError::PricePrecision { price: 120.125 }
        );
    }

    #[test]
    fn template_serializes_gateway_fields() {
        let template = MenuTemplate::new("Kitfo Special", "Spiced", 180.5).unwrap();
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["name"], "Kitfo Special");
        assert_eq!(json["description"], "Spiced");
        assert_eq!(json["price"], 180.5);
    }
}
