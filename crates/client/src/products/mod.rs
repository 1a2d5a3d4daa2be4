//! Product service: catalog browsing, search and admin catalog management.
//!
//! Catalog reads are public; the bearer token is still attached when one
//! is cached. Admin writes require a session.
//!
//! `categories`, `low_stock_products` and `product_stats` have no backend
//! route yet. They return fixed empty payloads without touching the
//! network and log a warning each time they are used.

mod types;

pub use types::*;

use ddd_micro_core::ProductId;
use rust_decimal::Decimal;
use tracing::{instrument, warn};

use crate::envelope::{ApiResponse, EmptyResponse};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

/// Default page size of [`ProductService::featured_products`].
pub const DEFAULT_FEATURED_LIMIT: u32 = 10;

/// Stock level at or below which a product counts as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

const PLACEHOLDER_PAGE_LIMIT: u32 = 20;

/// Client for the `/products` and `/admin/products` endpoints.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    /// Create a service over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    // ---- Public endpoints ----

    /// List products with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        params: &ListProductsParams,
    ) -> Result<ApiResponse<ListProductsResponse>, ClientError> {
        self.api
            .get_with_query("/products", &params.to_query())
            .await
    }

    /// Full-text search over the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        request: &SearchProductsRequest,
    ) -> Result<ApiResponse<SearchProductsResponse>, ClientError> {
        self.api
            .get_with_query("/products/search", &request.to_query())
            .await
    }

    /// List products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        category: &str,
        page: PageParams,
    ) -> Result<ApiResponse<ListProductsResponse>, ClientError> {
        self.api
            .get_with_query(&category_path(category), &page.to_query())
            .await
    }

    /// Fetch one product with variants and related products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<ProductResponse>, ClientError> {
        self.api.get(&format!("/products/{id}")).await
    }

    /// Record a product view for analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, request), fields(product_id = %id))]
    pub async fn record_view(
        &self,
        id: ProductId,
        request: &ViewProductRequest,
    ) -> Result<EmptyResponse, ClientError> {
        self.api
            .post(&format!("/products/{id}/view"), request)
            .await
    }

    /// Record a product view in the background.
    ///
    /// The ping runs on the current tokio runtime; failures are logged and
    /// otherwise ignored. Must be called from within a runtime.
    pub fn record_view_detached(
        &self,
        id: ProductId,
        request: ViewProductRequest,
    ) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.record_view(id, &request).await {
                warn!(product_id = %id, error = %e, "Failed to record product view");
            }
        })
    }

    // ---- Convenience listings ----

    /// Featured products, `limit` defaulting to [`DEFAULT_FEATURED_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn featured_products(
        &self,
        limit: Option<u32>,
    ) -> Result<ApiResponse<ListProductsResponse>, ClientError> {
        let params = ListProductsParams {
            is_featured: Some(true),
            limit: Some(limit.unwrap_or(DEFAULT_FEATURED_LIMIT)),
            ..ListProductsParams::default()
        };
        self.list_products(&params).await
    }

    /// Products of one brand.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn products_by_brand(
        &self,
        brand: &str,
        page: PageParams,
    ) -> Result<ApiResponse<ListProductsResponse>, ClientError> {
        let params = ListProductsParams {
            brand: Some(brand.to_owned()),
            ..ListProductsParams::from_page(&page)
        };
        self.list_products(&params).await
    }

    /// Products priced between `min` and `max`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn products_in_price_range(
        &self,
        min: Decimal,
        max: Decimal,
        page: PageParams,
    ) -> Result<ApiResponse<ListProductsResponse>, ClientError> {
        let params = ListProductsParams {
            min_price: Some(min),
            max_price: Some(max),
            ..ListProductsParams::from_page(&page)
        };
        self.list_products(&params).await
    }

    // ---- Admin endpoints ----

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(sku = %request.sku))]
    pub async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<ApiResponse<Product>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/admin/products", request).await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> Result<ApiResponse<Product>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .put(&format!("/admin/products/{id}"), request)
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<EmptyResponse, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.delete(&format!("/admin/products/{id}")).await
    }

    /// Set the stock level of a product.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_stock(
        &self,
        id: ProductId,
        stock_quantity: i64,
    ) -> Result<ApiResponse<StockUpdateResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .put(
                &format!("/admin/products/{id}/stock"),
                &UpdateStockRequest { stock_quantity },
            )
            .await
    }

    /// Make a product visible in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn activate_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<ProductActivationResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/admin/products/{id}/activate"))
            .await
    }

    /// Hide a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn deactivate_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<ProductActivationResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/admin/products/{id}/deactivate"))
            .await
    }

    /// Mark a product as featured.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_featured(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<ProductFeaturedResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/admin/products/{id}/featured"))
            .await
    }

    /// Remove the featured mark from a product.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn unfeature_product(
        &self,
        id: ProductId,
    ) -> Result<ApiResponse<ProductFeaturedResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .delete(&format!("/admin/products/{id}/featured"))
            .await
    }

    // ---- Placeholders (no backend route) ----
    // TODO: call the product service once it exposes category, low-stock and stats routes.

    /// Category listing. Always empty.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn categories(&self) -> ApiResponse<CategoryResponse> {
        warn!("Serving placeholder category listing");
        ApiResponse::ok(
            "Categories retrieved successfully",
            CategoryResponse::default(),
        )
    }

    /// Low-stock report. Always empty, echoing the requested page
    /// (`offset` 0 and `limit` 20 when unset).
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn low_stock_products(
        &self,
        threshold: u32,
        page: PageParams,
    ) -> ApiResponse<ListProductsResponse> {
        warn!(threshold, "Serving placeholder low-stock report");
        ApiResponse::ok(
            "Low stock products retrieved successfully",
            ListProductsResponse {
                products: Vec::new(),
                total: 0,
                offset: page.offset.unwrap_or(0),
                // A zero page size falls back to the default as well.
                limit: page
                    .limit
                    .filter(|&limit| limit > 0)
                    .unwrap_or(PLACEHOLDER_PAGE_LIMIT),
                filters: ProductFilters::default(),
            },
        )
    }

    /// Catalog counters. Always zero.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn product_stats(&self) -> ApiResponse<ProductStats> {
        warn!("Serving placeholder product statistics");
        ApiResponse::ok(
            "Product statistics retrieved successfully",
            ProductStats::default(),
        )
    }
}

/// Category names go into the path, so they are encoded as a path segment
/// (`Home Garden` becomes `Home%20Garden`, never `Home+Garden`).
fn category_path(category: &str) -> String {
    format!("/products/category/{}", urlencoding::encode(category))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;
    use crate::redirect::LogRedirect;

    fn service() -> ProductService {
        // Nothing listens here; placeholders must not reach it.
        let api = ApiClient::new(
            &Url::parse("http://127.0.0.1:9").unwrap(),
            Session::in_memory(),
            Arc::new(LogRedirect),
            "/login",
        )
        .unwrap();
        ProductService::new(api)
    }

    #[test]
    fn test_categories_placeholder() {
        let response = service().categories();
        assert!(response.is_success());
        assert_eq!(response.message, "Categories retrieved successfully");
        let data = response.into_data().unwrap();
        assert!(data.categories.is_empty());
        assert_eq!(data.total, 0);
    }

    #[test]
    fn test_low_stock_placeholder_echoes_page() {
        let response = service().low_stock_products(
            DEFAULT_LOW_STOCK_THRESHOLD,
            PageParams {
                offset: Some(40),
                ..PageParams::default()
            },
        );
        let data = response.into_data().unwrap();
        assert_eq!(data.offset, 40);
        assert_eq!(data.limit, 20);
        assert!(data.products.is_empty());
        assert_eq!(data.filters, ProductFilters::default());
    }

    #[test]
    fn test_stats_placeholder_is_zero() {
        let response = service().product_stats();
        assert_eq!(response.message, "Product statistics retrieved successfully");
        assert_eq!(response.into_data().unwrap(), ProductStats::default());
    }

    #[tokio::test]
    async fn test_admin_calls_require_session() {
        let err = service()
            .delete_product(ProductId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[test]
    fn test_low_stock_placeholder_treats_zero_limit_as_unset() {
        let response = service().low_stock_products(
            DEFAULT_LOW_STOCK_THRESHOLD,
            PageParams {
                offset: Some(0),
                limit: Some(0),
                ..PageParams::default()
            },
        );
        let data = response.into_data().unwrap();
        assert_eq!(data.offset, 0);
        assert_eq!(data.limit, 20);

        let response = service().low_stock_products(
            DEFAULT_LOW_STOCK_THRESHOLD,
            PageParams {
                limit: Some(5),
                ..PageParams::default()
            },
        );
        assert_eq!(response.into_data().unwrap().limit, 5);
    }

    #[test]
    fn test_category_path_encodes_as_segment() {
        assert_eq!(
            category_path("Home Garden"),
            "/products/category/Home%20Garden"
        );
        assert_eq!(category_path("a/b+c"), "/products/category/a%2Fb%2Bc");
        assert_eq!(category_path("books"), "/products/category/books");
    }
}
