//! Input bounds accepted by the gateway for generated payloads.
//!
//! Every generated restaurant and order is checked against these values at
//! construction time, so anything that reaches the network already satisfies
//! the gateway's validation.

/// Southern edge of the registration bounding box.
pub const LATITUDE_MIN: f64 = 9.0;
/// Northern edge of the registration bounding box.
pub const LATITUDE_MAX: f64 = 9.1;
/// Western edge of the registration bounding box.
pub const LONGITUDE_MIN: f64 = 38.7;
/// Eastern edge of the registration bounding box.
pub const LONGITUDE_MAX: f64 = 38.8;

/// Fewest menu entries a generated restaurant carries.
pub const MENU_ITEMS_MIN: usize = 5;
/// Most menu entries a generated restaurant carries.
pub const MENU_ITEMS_MAX: usize = 10;

/// Lowest generated menu price.
pub const PRICE_MIN: f64 = 50.0;
/// Highest generated menu price.
pub const PRICE_MAX: f64 = 500.0;

/// Most distinct lines in one order.
pub const ORDER_LINES_MAX: usize = 3;
/// Smallest quantity per order line.
pub const QUANTITY_MIN: u32 = 1;
/// Largest quantity per order line.
pub const QUANTITY_MAX: u32 = 5;

/// Coordinate decimals kept on generated restaurants.
pub const COORDINATE_DECIMALS: i32 = 6;
/// Price decimals kept on generated menu entries.
pub const PRICE_DECIMALS: i32 = 2;

/// Rounds `value` to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Returns `true` if `value` already has at most `decimals` places.
#[must_use]
pub fn has_decimals(value: f64, decimals: i32) -> bool {
    (round_to(value, decimals) - value).abs() < 1e-9
}
