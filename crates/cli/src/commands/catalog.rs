//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! micro-cli products list --category shoes --sort-by price --sort-order desc
//! micro-cli products get 42
//! micro-cli products search "trail runner" --limit 5
//! ```

use ddd_micro_client::ShopClient;
use ddd_micro_client::products::{ListProductsParams, SearchProductsRequest};
use ddd_micro_core::ProductId;

use super::{CliError, print_json};

/// List products.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(shop: &ShopClient, params: &ListProductsParams) -> Result<(), CliError> {
    let response = shop.products().list_products(params).await?;
    print_json(&response)
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn get(shop: &ShopClient, id: ProductId) -> Result<(), CliError> {
    let response = shop.products().get_product(id).await?;
    print_json(&response)
}

/// Search the catalog.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn search(shop: &ShopClient, query: String, limit: Option<u32>) -> Result<(), CliError> {
    let request = SearchProductsRequest {
        query: Some(query),
        limit,
        ..Default::default()
    };
    let response = shop.products().search_products(&request).await?;
    print_json(&response)
}
