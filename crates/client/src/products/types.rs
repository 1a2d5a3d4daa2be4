//! Product API request and response types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ddd_micro_core::{CategoryId, ProductId, SortBy, SortOrder, UserId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::query::QueryParams;

/// Free-form key/value product attributes.
pub type Specifications = BTreeMap<String, serde_json::Value>;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub sku: String,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specifications: Specifications,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A purchasable variation of a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub name: String,
    pub value: String,
    pub price_adjustment: Decimal,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Variant submitted alongside a new product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVariant {
    pub name: String,
    pub value: String,
    pub price_adjustment: Decimal,
    pub stock_quantity: i64,
    pub is_active: bool,
}

/// Body for `POST /admin/products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub sku: String,
    pub stock_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<NewVariant>>,
}

/// Body for `PUT /admin/products/:id`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// Body for `PUT /admin/products/:id/stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateStockRequest {
    pub stock_quantity: i64,
}

/// Optional analytics context for `POST /products/:id/view`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProductsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub is_featured: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ListProductsParams {
    /// Carry over paging and sorting from `page`.
    #[must_use]
    pub fn from_page(page: &PageParams) -> Self {
        Self {
            offset: page.offset,
            limit: page.limit,
            sort_by: page.sort_by,
            sort_order: page.sort_order,
            ..Self::default()
        }
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("category", self.category.as_deref())
            .push_opt("brand", self.brand.as_deref())
            .push_opt("min_price", self.min_price)
            .push_opt("max_price", self.max_price)
            .push_opt("is_featured", self.is_featured)
            .push_opt("sort_by", self.sort_by)
            .push_opt("sort_order", self.sort_order)
    }
}

/// Paging and sorting shared by the narrower listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl PageParams {
    pub(crate) fn to_query(self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("sort_by", self.sort_by)
            .push_opt("sort_order", self.sort_order)
    }
}

/// Query for `GET /products/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchProductsRequest {
    pub query: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl SearchProductsRequest {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("query", self.query.as_deref())
            .push_opt("category", self.category.as_deref())
            .push_opt("brand", self.brand.as_deref())
            .push_opt("min_price", self.min_price)
            .push_opt("max_price", self.max_price)
            .push_opt("is_featured", self.is_featured)
            .push_opt("is_active", self.is_active)
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("sort_by", self.sort_by)
            .push_opt("sort_order", self.sort_order)
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Facets available for narrowing a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brands: Vec<String>,
    #[serde(default)]
    pub price_range: PriceRange,
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProductsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
    #[serde(default)]
    pub filters: ProductFilters,
}

/// A product with its variants and related items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_products: Vec<Product>,
    #[serde(default)]
    pub view_count: u64,
}

/// A page of search hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProductsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
    #[serde(default)]
    pub search_query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters_applied: BTreeMap<String, serde_json::Value>,
}

/// Category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    pub total: u64,
}

/// Result of a stock update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdateResponse {
    pub product_id: ProductId,
    pub old_stock: i64,
    pub new_stock: i64,
    pub updated_at: DateTime<Utc>,
}

/// Result of activating or deactivating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductActivationResponse {
    pub product_id: ProductId,
    pub is_active: bool,
    #[serde(default)]
    pub message: String,
}

/// Result of featuring or unfeaturing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeaturedResponse {
    pub product_id: ProductId,
    pub is_featured: bool,
    #[serde(default)]
    pub message: String,
}

/// Catalog-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStats {
    pub total_products: u64,
    pub active_products: u64,
    pub inactive_products: u64,
    pub featured_products: u64,
    pub low_stock_products: u64,
    pub total_categories: u64,
    pub total_brands: u64,
}
