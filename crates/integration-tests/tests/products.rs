//! Catalog reads, admin mutations and placeholder operations.

use ddd_micro_client::ClientError;
use ddd_micro_client::products::{
    CreateProductRequest, ListProductsParams, PageParams, SearchProductsRequest,
    UpdateProductRequest, ViewProductRequest,
};
use ddd_micro_core::{ProductId, Role, SortBy, SortOrder, UserId};
use ddd_micro_integration_tests::{Harness, TIMESTAMP, bearer, ok, product_json};
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn page(products: Vec<Value>, limit: u32) -> Value {
    let total = products.len();
    json!({
        "products": products,
        "total": total,
        "offset": 0,
        "limit": limit,
        "filters": { "categories": ["shoes"], "brands": null, "price_range": { "min": 5, "max": 50 } },
    })
}

#[tokio::test]
async fn test_list_products_is_public_and_forwards_params_verbatim() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products")
                .query_param("offset", "10")
                .query_param("limit", "5")
                .query_param("category", "running shoes")
                .query_param("sort_by", "price")
                .query_param("sort_order", "desc");
            then.status(200).json_body(ok(
                "Products retrieved successfully",
                page(vec![product_json(1, "Trail Runner")], 5),
            ));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let response = harness
        .shop
        .products()
        .list_products(&ListProductsParams {
            offset: Some(10),
            limit: Some(5),
            category: Some("running shoes".to_string()),
            sort_by: Some(SortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        })
        .await
        .expect("list");

    mock.assert_hits_async(1).await;
    let listing = response.data().expect("page");
    let first = listing.products.first().expect("one product");
    assert_eq!(listing.products.len(), 1);
    assert_eq!(first.price, Decimal::new(1999, 2));
    assert!(first.images.is_empty());
    assert!(listing.filters.brands.is_empty());
}

#[tokio::test]
async fn test_unset_filters_are_not_sent() {
    let server = MockServer::start_async().await;
    let with_brand = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products").query_param_exists("brand");
            then.status(500);
        })
        .await;
    let with_offset = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products").query_param_exists("offset");
            then.status(500);
        })
        .await;
    let featured = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products")
                .query_param("is_featured", "true")
                .query_param("limit", "10");
            then.status(200)
                .json_body(ok("Products retrieved successfully", page(Vec::new(), 10)));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let response = harness
        .shop
        .products()
        .featured_products(None)
        .await
        .expect("featured");

    featured.assert_hits_async(1).await;
    assert_eq!(with_brand.hits_async().await, 0);
    assert_eq!(with_offset.hits_async().await, 0);
    assert_eq!(response.data().expect("page").limit, 10);
}

#[tokio::test]
async fn test_price_range_listing_sends_bounds() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products")
                .query_param("min_price", "10.00")
                .query_param("max_price", "25.50")
                .query_param("limit", "3");
            then.status(200)
                .json_body(ok("Products retrieved successfully", page(Vec::new(), 3)));
        })
        .await;

    let harness = Harness::anonymous(&server);
    harness
        .shop
        .products()
        .products_in_price_range(
            Decimal::new(1000, 2),
            Decimal::new(2550, 2),
            PageParams {
                limit: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("range");

    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_search_and_category_listing() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products/search")
                .query_param("query", "trail runner")
                .query_param("is_active", "true");
            then.status(200).json_body(ok(
                "Search completed successfully",
                json!({
                    "products": [product_json(4, "Trail Runner")],
                    "total": 1,
                    "offset": 0,
                    "limit": 20,
                    "search_query": "trail runner",
                    "filters_applied": null,
                }),
            ));
        })
        .await;
    let category = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/category/shoes");
            then.status(200)
                .json_body(ok("Products retrieved successfully", page(Vec::new(), 20)));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let products = harness.shop.products();

    let hits = products
        .search_products(&SearchProductsRequest {
            query: Some("trail runner".to_string()),
            is_active: Some(true),
            ..Default::default()
        })
        .await
        .expect("search");
    let hits = hits.into_data().expect("hits");
    assert_eq!(hits.search_query, "trail runner");
    assert!(hits.filters_applied.is_empty());

    products
        .products_by_category("shoes", PageParams::default())
        .await
        .expect("category");

    search.assert_hits_async(1).await;
    category.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_category_with_space_is_percent_encoded_in_path() {
    let server = MockServer::start_async().await;
    let plus = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("Home+Garden");
            then.status(404);
        })
        .await;
    let category = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products/category/Home%20Garden")
                .query_param("limit", "5");
            then.status(200)
                .json_body(ok("Products retrieved successfully", page(Vec::new(), 5)));
        })
        .await;

    let harness = Harness::anonymous(&server);
    harness
        .shop
        .products()
        .products_by_category(
            "Home Garden",
            PageParams {
                limit: Some(5),
                ..PageParams::default()
            },
        )
        .await
        .expect("category");

    category.assert_hits_async(1).await;
    plus.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_brand_listing_filters_on_brand() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/products")
                .query_param("brand", "Acme")
                .query_param("offset", "20")
                .query_param("sort_by", "name");
            then.status(200).json_body(ok(
                "Products retrieved successfully",
                page(vec![product_json(3, "Road Runner")], 20),
            ));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let response = harness
        .shop
        .products()
        .products_by_brand(
            "Acme",
            PageParams {
                offset: Some(20),
                sort_by: Some(SortBy::Name),
                ..PageParams::default()
            },
        )
        .await
        .expect("brand");

    mock.assert_hits_async(1).await;
    let listing = response.into_data().expect("page");
    assert_eq!(listing.products.first().expect("product").brand, "Acme");
}

#[tokio::test]
async fn test_create_product_sends_only_set_fields_and_keeps_response_values() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/admin/products")
                .header("authorization", bearer())
                .json_body(json!({
                    "name": "Garden Hose",
                    "description": "Twenty metres",
                    "price": 29.99,
                    "category": "Home Garden",
                    "brand": "Acme",
                    "sku": "HOSE-20",
                    "stock_quantity": 0,
                }));
            then.status(201).json_body(ok(
                "Product created successfully",
                json!({
                    "id": 9,
                    "name": "Garden Hose",
                    "description": "Twenty metres",
                    "price": 29.99,
                    "category": "Home Garden",
                    "brand": "Acme",
                    "sku": "HOSE-20",
                    "stock_quantity": 0,
                    "is_active": true,
                    "is_featured": false,
                    "images": ["hose.jpg"],
                    "specifications": { "length_m": 20, "colour": "green" },
                    "created_at": TIMESTAMP,
                    "updated_at": TIMESTAMP,
                }),
            ));
        })
        .await;

    let harness = Harness::signed_in(&server, 1, Role::Admin);
    let response = harness
        .shop
        .products()
        .create_product(&CreateProductRequest {
            name: "Garden Hose".to_string(),
            description: "Twenty metres".to_string(),
            price: Decimal::new(2999, 2),
            category: "Home Garden".to_string(),
            brand: "Acme".to_string(),
            sku: "HOSE-20".to_string(),
            stock_quantity: 0,
            images: None,
            specifications: None,
            variants: None,
        })
        .await
        .expect("create");

    mock.assert_hits_async(1).await;
    assert_eq!(response.message, "Product created successfully");
    let product = response.into_data().expect("product");
    assert_eq!(product.id, ProductId::new(9));
    assert_eq!(product.price, Decimal::new(2999, 2));
    assert_eq!(product.stock_quantity, 0);
    assert_eq!(product.images, vec!["hose.jpg".to_string()]);
    assert_eq!(product.specifications.get("length_m"), Some(&json!(20)));
    assert_eq!(product.specifications.get("colour"), Some(&json!("green")));
}

#[tokio::test]
async fn test_get_product_decodes_null_collections() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/8");
            then.status(200).json_body(ok(
                "Product retrieved successfully",
                json!({
                    "product": product_json(8, "Court Shoe"),
                    "variants": null,
                    "related_products": null,
                    "view_count": 12,
                }),
            ));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let response = harness
        .shop
        .products()
        .get_product(ProductId::new(8))
        .await
        .expect("get");

    let detail = response.into_data().expect("detail");
    assert_eq!(detail.product.name, "Court Shoe");
    assert!(detail.variants.is_empty());
    assert!(detail.related_products.is_empty());
    assert_eq!(detail.view_count, 12);
}

#[tokio::test]
async fn test_missing_product_surfaces_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/404");
            then.status(404)
                .json_body(json!({ "success": false, "message": "Product not found" }));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let err = harness
        .shop
        .products()
        .get_product(ProductId::new(404))
        .await
        .expect_err("not found");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "API error (404): Product not found");
}

#[tokio::test]
async fn test_detached_view_ping_posts_only_set_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/products/3/view")
                .json_body(json!({ "user_id": 7 }));
            then.status(200)
                .json_body(json!({ "success": true, "message": "View recorded" }));
        })
        .await;

    let harness = Harness::anonymous(&server);
    harness
        .shop
        .products()
        .record_view_detached(
            ProductId::new(3),
            ViewProductRequest {
                user_id: Some(UserId::new(7)),
                ..Default::default()
            },
        )
        .await
        .expect("join");

    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_admin_mutations_send_bearer_and_bodies() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/admin/products/2")
                .header("authorization", bearer())
                .json_body(json!({ "price": 24.5 }));
            then.status(200)
                .json_body(ok("Product updated successfully", product_json(2, "Updated")));
        })
        .await;
    let stock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/admin/products/2/stock")
                .json_body(json!({ "stock_quantity": 40 }));
            then.status(200).json_body(ok(
                "Stock updated successfully",
                json!({ "product_id": 2, "old_stock": 12, "new_stock": 40, "updated_at": TIMESTAMP }),
            ));
        })
        .await;
    let feature = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/admin/products/2/featured");
            then.status(200).json_body(ok(
                "Product featured successfully",
                json!({ "product_id": 2, "is_featured": true }),
            ));
        })
        .await;
    let unfeature = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/admin/products/2/featured");
            then.status(200).json_body(ok(
                "Product unfeatured successfully",
                json!({ "product_id": 2, "is_featured": false }),
            ));
        })
        .await;
    let deactivate = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/admin/products/2/deactivate");
            then.status(200).json_body(ok(
                "Product deactivated successfully",
                json!({ "product_id": 2, "is_active": false }),
            ));
        })
        .await;

    let harness = Harness::signed_in(&server, 1, Role::Admin);
    let products = harness.shop.products();
    let id = ProductId::new(2);

    products
        .update_product(
            id,
            &UpdateProductRequest {
                price: Some(Decimal::new(245, 1)),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    let stock_change = products.update_stock(id, 40).await.expect("stock");
    assert_eq!(stock_change.data().expect("stock").new_stock, 40);
    assert!(products.set_featured(id).await.expect("feature").is_success());
    let unfeatured = products.unfeature_product(id).await.expect("unfeature");
    assert!(!unfeatured.data().expect("flag").is_featured);
    products.deactivate_product(id).await.expect("deactivate");

    update.assert_hits_async(1).await;
    stock.assert_hits_async(1).await;
    feature.assert_hits_async(1).await;
    unfeature.assert_hits_async(1).await;
    deactivate.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_admin_mutation_without_session_sends_nothing() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/admin/products");
            then.status(200).json_body(ok("", json!({})));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let err = harness
        .shop
        .products()
        .activate_product(ProductId::new(1))
        .await
        .expect_err("no session");

    assert!(matches!(err, ClientError::NotAuthenticated));
    assert_eq!(catch_all.hits_async().await, 0);
}

#[tokio::test]
async fn test_placeholders_never_touch_the_network() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/api/v1");
            then.status(200).json_body(ok("", json!({})));
        })
        .await;

    let harness = Harness::anonymous(&server);
    let products = harness.shop.products();

    let categories = products.categories();
    assert_eq!(categories.message, "Categories retrieved successfully");
    assert_eq!(categories.data().expect("categories").total, 0);

    let low_stock = products.low_stock_products(5, PageParams::default());
    let low_stock = low_stock.into_data().expect("report");
    assert_eq!((low_stock.offset, low_stock.limit, low_stock.total), (0, 20, 0));

    let stats = products.product_stats();
    assert!(stats.is_success());
    assert_eq!(stats.data().expect("stats").total_products, 0);

    assert_eq!(catch_all.hits_async().await, 0);
}
