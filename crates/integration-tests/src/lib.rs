//! Integration tests for the DDD Micro client.
//!
//! Every test starts an [`httpmock::MockServer`] standing in for both the
//! main and the payment backend, points a [`ShopClient`] at it, and
//! checks what actually went over the wire.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ddd-micro-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `users` - registration, login, profile and admin user management
//! - `products` - catalog queries, admin mutations, placeholders
//! - `baskets` - basket operations and sequential bulk helpers
//! - `payments` - payments, refunds, payment methods, admin analytics
//! - `session_eviction` - 401 handling and persisted sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use ddd_micro_client::users::User;
use ddd_micro_client::{ClientConfig, LoginRedirect, MemoryStore, SessionStore, ShopClient};
use ddd_micro_core::Role;
use httpmock::MockServer;
use serde_json::{Value, json};

/// Token stored by [`signed_in`].
pub const TEST_TOKEN: &str = "test-jwt-token";

/// Timestamp used in every fixture.
pub const TIMESTAMP: &str = "2024-05-01T12:00:00Z";

/// Records every login redirect instead of navigating.
#[derive(Debug, Default)]
pub struct CountingRedirect {
    count: AtomicUsize,
    last_path: Mutex<Option<String>>,
}

impl CountingRedirect {
    /// Number of redirects fired so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Path passed to the most recent redirect.
    #[must_use]
    pub fn last_path(&self) -> Option<String> {
        self.last_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LoginRedirect for CountingRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(login_path.to_owned());
    }
}

/// A client wired to a mock server, plus handles for inspecting it.
pub struct Harness {
    pub shop: ShopClient,
    pub store: Arc<MemoryStore>,
    pub redirect: Arc<CountingRedirect>,
}

impl Harness {
    /// Client with an empty session.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URL is not a valid base URL.
    #[must_use]
    pub fn anonymous(server: &MockServer) -> Self {
        Self::with_backends(server, server)
    }

    /// Client with an empty session, sending payment calls to `payments`
    /// and everything else to `main`.
    ///
    /// # Panics
    ///
    /// Panics if either mock server URL is not a valid base URL.
    #[must_use]
    pub fn with_backends(main: &MockServer, payments: &MockServer) -> Self {
        let config = ClientConfig::new(&main.base_url())
            .and_then(|config| config.with_payment_api_url(&payments.base_url()))
            .expect("mock server URL")
            .with_login_path("/login");
        let store = Arc::new(MemoryStore::new());
        let redirect = Arc::new(CountingRedirect::default());
        let shop = ShopClient::new(
            &config,
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::clone(&redirect) as Arc<dyn LoginRedirect>,
        )
        .expect("client");
        Self {
            shop,
            store,
            redirect,
        }
    }

    /// Client whose session already holds [`TEST_TOKEN`] and a user with `role`.
    ///
    /// # Panics
    ///
    /// Panics if the session cannot be written.
    #[must_use]
    pub fn signed_in(server: &MockServer, user_id: u64, role: Role) -> Self {
        let harness = Self::anonymous(server);
        harness
            .shop
            .session()
            .store_login(TEST_TOKEN, &user(user_id, role))
            .expect("store login");
        harness
    }
}

/// Bearer header value for [`TEST_TOKEN`].
#[must_use]
pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

/// Wire JSON for a user.
#[must_use]
pub fn user_json(id: u64, role: Role) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "first_name": "Test",
        "last_name": "User",
        "role": role.as_str(),
        "is_active": true,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

/// Typed user matching [`user_json`].
///
/// # Panics
///
/// Panics if the fixture does not deserialize.
#[must_use]
pub fn user(id: u64, role: Role) -> User {
    serde_json::from_value(user_json(id, role)).expect("user fixture")
}

/// Wire JSON for a product.
#[must_use]
pub fn product_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "A fine product",
        "price": 19.99,
        "category": "shoes",
        "brand": "Acme",
        "sku": format!("SKU-{id}"),
        "stock_quantity": 12,
        "is_active": true,
        "is_featured": false,
        "images": null,
        "specifications": null,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

/// Wire JSON for a basket holding one line per `(product_id, quantity)`.
#[must_use]
pub fn basket_json(user_id: u64, items: &[(u64, u32)]) -> Value {
    let lines: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (product_id, quantity))| {
            json!({
                "id": i + 1,
                "product_id": product_id,
                "quantity": quantity,
                "unit_price": 10.0,
                "total_price": 10.0 * f64::from(*quantity),
                "created_at": TIMESTAMP,
                "updated_at": TIMESTAMP,
            })
        })
        .collect();
    let item_count: u32 = items.iter().map(|(_, quantity)| quantity).sum();

    json!({
        "id": "basket-1",
        "user_id": user_id,
        "items": lines,
        "total": 10.0 * f64::from(item_count),
        "item_count": item_count,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
        "expires_at": "2024-05-08T12:00:00Z",
    })
}

/// Wire JSON for a payment.
#[must_use]
pub fn payment_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": 7,
        "order_id": "order-1",
        "amount": 49.5,
        "currency": "USD",
        "status": status,
        "payment_method": "credit_card",
        "payment_provider": "stripe",
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

/// Success envelope around `data`.
#[must_use]
pub fn ok(message: &str, data: Value) -> Value {
    json!({ "success": true, "message": message, "data": data })
}
