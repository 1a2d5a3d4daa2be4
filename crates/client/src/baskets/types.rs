//! Basket API request and response types.

use chrono::{DateTime, Utc};
use ddd_micro_core::{BasketId, BasketItemId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// A user's shopping basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub id: BasketId,
    pub user_id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<BasketItem>,
    pub total: Decimal,
    pub item_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub is_expired: bool,
}

impl Basket {
    /// The line for `product_id`, if present.
    #[must_use]
    pub fn item(&self, product_id: ProductId) -> Option<&BasketItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// One product line in a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: BasketItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /basket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateBasketRequest {
    pub user_id: UserId,
}

/// Body for `POST /basket/items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Body for `PUT /basket/items?product_id=..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateItemRequest {
    pub user_id: UserId,
    pub quantity: u32,
}

/// An item to add in a bulk call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// A quantity change in a bulk call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuantity {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload of `DELETE /basket/clear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearBasketResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Payload of `DELETE /admin/baskets/:user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBasketResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Payload of `POST /admin/baskets/cleanup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupExpiredBasketsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub cleaned_count: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_basket_deserializes_backend_shape() {
        let basket: Basket = serde_json::from_value(serde_json::json!({
            "id": "b-7f3a",
            "user_id": 3,
            "items": [{
                "id": 1,
                "product_id": 42,
                "quantity": 2,
                "unit_price": 10.5,
                "total_price": 21,
                "created_at": "2024-05-01T09:00:00Z",
                "updated_at": "2024-05-01T09:00:00Z"
            }],
            "total": 21,
            "item_count": 2,
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T09:00:00Z",
            "expires_at": "2024-05-08T09:00:00Z",
            "is_expired": false
        }))
        .unwrap();

        assert_eq!(basket.id.as_str(), "b-7f3a");
        assert_eq!(basket.total, Decimal::new(21, 0));
        let item = basket.item(ProductId::new(42)).unwrap();
        assert_eq!(item.unit_price, Decimal::new(105, 1));
        assert!(basket.item(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_empty_basket_with_null_items() {
        let basket: Basket = serde_json::from_value(serde_json::json!({
            "id": "b-1",
            "user_id": 3,
            "items": null,
            "total": 0,
            "item_count": 0,
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T09:00:00Z",
            "expires_at": "2024-05-08T09:00:00Z"
        }))
        .unwrap();
        assert!(basket.items.is_empty());
        assert!(!basket.is_expired);
    }
}
