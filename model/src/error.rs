//! Validation errors for payload construction.

use std::fmt;

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when a payload would violate the gateway's input contract.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    /// An identifier or required text field was empty.
    EmptyIdentifier { field: &'static str },

    /// A price was negative or not a finite number.
    NegativePrice { price: f64 },

    /// A generated menu price fell outside the accepted band.
    PriceOutOfRange { price: f64, min: f64, max: f64 },

    /// A generated menu price carried more than two decimals.
    PricePrecision { price: f64 },

    /// Latitude outside the permitted range.
    LatitudeOutOfRange { latitude: f64, min: f64, max: f64 },

    /// Longitude outside the permitted range.
    LongitudeOutOfRange { longitude: f64, min: f64, max: f64 },

    /// Registration menu size outside the permitted range.
    MenuSizeOutOfRange { len: usize, min: usize, max: usize },

    /// A fixture was built from a restaurant with no menu items.
    EmptyMenu { restaurant_id: String },

    /// Order line quantity outside the permitted range.
    QuantityOutOfRange { quantity: u32, min: u32, max: u32 },

    /// Order had no lines.
    EmptyOrder,

    /// A restaurant menu listed the same item id twice.
    DuplicateMenuItem {
        restaurant_id: String,
        item_id: String,
    },

    /// Order had more lines than allowed.
    TooManyOrderLines { len: usize, max: usize },

    /// The same menu item appeared twice in one order.
    DuplicateOrderItem { item_id: String },

    /// Search radius must be positive.
    InvalidRadius { radius_km: f64 },

    /// Email address was not shaped like `local@domain`.
    InvalidEmail { email: String },

    /// Secret key was not a UUID string.
    InvalidSecretKey { secret_key: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier { field } => write!(f, "{field} must not be empty"),
            Self::NegativePrice { price } => {
                write!(f, "price must be a finite non-negative number, got {price}")
            }
            Self::PriceOutOfRange { price, min, max } => {
                write!(f, "price {price} outside [{min}, {max}]")
            }
            Self::PricePrecision { price } => {
                write!(f, "price {price} has more than two decimals")
            }
            Self::LatitudeOutOfRange { latitude, min, max } => {
                write!(f, "latitude {latitude} outside [{min}, {max}]")
            }
            Self::LongitudeOutOfRange {
                longitude,
                min,
                max,
            } => {
                write!(f, "longitude {longitude} outside [{min}, {max}]")
            }
            Self::MenuSizeOutOfRange { len, min, max } => {
                write!(f, "menu has {len} items, expected {min}..={max}")
            }
            Self::EmptyMenu { restaurant_id } => {
                write!(f, "restaurant {restaurant_id} has no menu items")
            }
            Self::QuantityOutOfRange { quantity, min, max } => {
                write!(f, "quantity {quantity} outside {min}..={max}")
            }
            Self::DuplicateMenuItem {
                restaurant_id,
                item_id,
            } => {
                write!(f, "restaurant {restaurant_id} lists menu item {item_id} more than once")
            }
            Self::EmptyOrder => write!(f, "order has no items"),
            Self::TooManyOrderLines { len, max } => {
                write!(f, "order has {len} items, at most {max} allowed")
            }
            Self::DuplicateOrderItem { item_id } => {
                write!(f, "menu item {item_id} appears more than once in the order")
            }
            Self::InvalidRadius { radius_km } => {
                write!(f, "radius_km must be greater than zero, got {radius_km}")
            }
            Self::InvalidEmail { email } => write!(f, "invalid email address: {email:?}"),
            Self::InvalidSecretKey { secret_key } => {
                write!(f, "secret key is not a UUID: {secret_key:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_menu_size() {
        let err = ModelError::MenuSizeOutOfRange {
            len: 11,
            min: 5,
            max: 10,
        };
        assert_eq!(err.to_string(), "menu has 11 items, expected 5..=10");
    }

    #[test]
    fn display_empty_menu_names_restaurant() {
        let err = ModelError::EmptyMenu {
            restaurant_id: "r-42".to_string(),
        };
        assert!(err.to_string().contains("r-42"));
    }

    #[test]
    fn display_duplicate_item() {
        let err = ModelError::DuplicateOrderItem {
            item_id: "item-a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("item-a"));
        assert!(msg.contains("more than once"));
    }

    #[test]
    fn display_duplicate_menu_item_names_both_ids() {
        let err = ModelError::DuplicateMenuItem {
            restaurant_id: "r-7".to_string(),
            item_id: "item-a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "restaurant r-7 lists menu item item-a more than once"
        );
    }
}
