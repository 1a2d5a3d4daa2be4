//! Basket commands. All require a signed-in session.
//!
//! # Usage
//!
//! ```bash
//! micro-cli basket show
//! micro-cli basket add 42 --quantity 2 --unit-price 19.99
//! micro-cli basket remove 42 43
//! micro-cli basket clear
//! ```

use ddd_micro_client::ShopClient;
use ddd_micro_core::ProductId;
use rust_decimal::Decimal;

use super::{CliError, print_json};

/// Print the basket.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn show(shop: &ShopClient) -> Result<(), CliError> {
    let response = shop.baskets().get_basket().await?;
    print_json(&response)
}

/// Add one product.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn add(
    shop: &ShopClient,
    product_id: ProductId,
    quantity: u32,
    unit_price: Decimal,
) -> Result<(), CliError> {
    let response = shop
        .baskets()
        .add_item(product_id, quantity, unit_price)
        .await?;
    print_json(&response)
}

/// Remove products in order, stopping at the first failure.
///
/// # Errors
///
/// Returns an error without a session or on the first failed removal.
pub async fn remove(shop: &ShopClient, product_ids: &[ProductId]) -> Result<(), CliError> {
    let response = shop.baskets().remove_items(product_ids).await?;
    print_json(&response)
}

/// Empty the basket.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn clear(shop: &ShopClient) -> Result<(), CliError> {
    let response = shop.baskets().clear_basket().await?;
    print_json(&response)
}
