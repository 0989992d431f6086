//! Order payloads for `POST /api/v1/restaurants/orders`.

use std::collections::HashSet;

use serde::Serialize;

use crate::bounds::{ORDER_LINES_MAX, QUANTITY_MAX, QUANTITY_MIN};
use crate::error::{ModelError, ModelResult};
use crate::{CustomerId, ItemId, RestaurantId};

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    item_id: ItemId,
    quantity: u32,
}

impl OrderLine {
    pub fn new(item_id: ItemId, quantity: u32) -> ModelResult<Self> {
        if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&quantity) {
            return Err(ModelError::QuantityOutOfRange {
                quantity,
                min: QUANTITY_MIN,
                max: QUANTITY_MAX,
            });
        }
        Ok(Self { item_id, quantity })
    }

    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// An order against one restaurant.
///
/// Lines are non-empty, bounded by [`ORDER_LINES_MAX`], and never repeat a
/// menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    items: Vec<OrderLine>,
}

impl OrderRequest {
    pub fn new(
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        items: Vec<OrderLine>,
    ) -> ModelResult<Self> {
        if items.is_empty() {
            return Err(ModelError::EmptyOrder);
        }
        if items.len() > ORDER_LINES_MAX {
            return Err(ModelError::TooManyOrderLines {
                len: items.len(),
                max: ORDER_LINES_MAX,
            });
        }
        let mut seen = HashSet::with_capacity(items.len());
        for line in &items {
            if !seen.insert(line.item_id.as_str()) {
                return Err(ModelError::DuplicateOrderItem {
                    item_id: line.item_id.to_string(),
                });
            }
        }
        Ok(Self {
            customer_id,
            restaurant_id,
            items,
        })
    }

    #[must_use]
    pub const fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    #[must_use]
    pub const fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }

    #[must_use]
    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32) -> OrderLine {
        OrderLine::new(ItemId::new(id).unwrap(), quantity).unwrap()
    }

    fn ids() -> (CustomerId, RestaurantId) {
        (
            CustomerId::new("c1").unwrap(),
            RestaurantId::new("r1").unwrap(),
        )
    }

    #[test]
    fn quantity_bounds() {
        let id = ItemId::new("a").unwrap();
        assert!(OrderLine::new(id.clone(), 0).is_err());
        assert!(OrderLine::new(id.clone(), 1).is_ok());
        assert!(OrderLine::new(id.clone(), 5).is_ok());
        assert_eq!(
            OrderLine::new(id, 6).unwrap_err(),
            ModelError::QuantityOutOfRange {
                quantity: 6,
                min: 1,
                max: 5
            }
        );
    }

    #[test]
    fn order_rejects_empty() {
        let (customer, restaurant) = ids();
        assert_eq!(
            OrderRequest::new(customer, restaurant, Vec::new()).unwrap_err(),
            ModelError::EmptyOrder
        );
    }

    #[test]
    fn order_rejects_duplicates() {
        let (customer, restaurant) = ids();
        let err = OrderRequest::new(customer, restaurant, vec![line("a", 1), line("a", 2)])
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateOrderItem { .. }));
    }

    #[test]
    fn order_rejects_too_many_lines() {
        let (customer, restaurant) = ids();
        let items = vec![line("a", 1), line("b", 1), line("c", 1), line("d", 1)];
        assert_eq!(
            OrderRequest::new(customer, restaurant, items).unwrap_err(),
            ModelError::TooManyOrderLines { len: 4, max: 3 }
        );
    }

    #[test]
    fn order_serializes_dto_shape() {
        let (customer, restaurant) = ids();
        let order = OrderRequest::new(customer, restaurant, vec![line("a", 2)]).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "customer_id": "c1",
                "restaurant_id": "r1",
                "items": [{"item_id": "a", "quantity": 2}],
            })
        );
    }
}
