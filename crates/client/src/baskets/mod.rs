//! Basket service: the signed-in user's cart plus admin basket maintenance.
//!
//! Every user-facing call resolves the current user from the cached
//! session snapshot first and fails with
//! [`ClientError::NotAuthenticated`] before any request is sent when
//! there is none. Multi-item helpers live in [`bulk`].

pub mod bulk;
mod types;

pub use bulk::{BatchReport, ItemOutcome};
pub use types::*;

use ddd_micro_core::{ProductId, UserId};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::envelope::ApiResponse;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::query::QueryParams;
use crate::session::Session;
use crate::users::User;

/// Client for the `/basket` and `/admin/baskets` endpoints.
#[derive(Debug, Clone)]
pub struct BasketService {
    api: ApiClient,
}

impl BasketService {
    /// Create a service over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    fn current_user(&self) -> Result<User, ClientError> {
        self.session().require_user()
    }

    // ---- User endpoints ----

    /// Create a basket for the current user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn create_basket(&self) -> Result<ApiResponse<Basket>, ClientError> {
        let user = self.current_user()?;
        self.api
            .post("/basket", &CreateBasketRequest { user_id: user.id })
            .await
    }

    /// Fetch the current user's basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn get_basket(&self) -> Result<ApiResponse<Basket>, ClientError> {
        self.current_user()?;
        self.api.get("/basket").await
    }

    /// Add `quantity` of a product at `unit_price`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        let user = self.current_user()?;
        self.send_add(user.id, product_id, quantity, unit_price)
            .await
    }

    /// Set the quantity of a product already in the basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_item(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        let user = self.current_user()?;
        self.send_update(user.id, product_id, quantity).await
    }

    /// Remove a product from the basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_item(
        &self,
        product_id: ProductId,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        self.current_user()?;
        self.send_remove(product_id).await
    }

    /// Empty the basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn clear_basket(&self) -> Result<ApiResponse<ClearBasketResponse>, ClientError> {
        self.current_user()?;
        self.api.delete("/basket/clear").await
    }

    // ---- Admin endpoints ----

    /// Fetch any user's basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_user_basket(
        &self,
        user_id: UserId,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/admin/baskets/{user_id}")).await
    }

    /// Delete any user's basket.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user_basket(
        &self,
        user_id: UserId,
    ) -> Result<ApiResponse<DeleteBasketResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.delete(&format!("/admin/baskets/{user_id}")).await
    }

    /// Ask the backend to purge expired baskets.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn cleanup_expired_baskets(
        &self,
    ) -> Result<ApiResponse<CleanupExpiredBasketsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post_empty("/admin/baskets/cleanup").await
    }

    // ---- Summaries ----

    /// Number of units in the basket; 0 when the backend returns no basket.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`get_basket`](Self::get_basket).
    pub async fn item_count(&self) -> Result<u32, ClientError> {
        Ok(self
            .get_basket()
            .await?
            .into_success_data()
            .map_or(0, |basket| basket.item_count))
    }

    /// Whether the basket has no lines; true when the backend returns no basket.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`get_basket`](Self::get_basket).
    pub async fn is_empty(&self) -> Result<bool, ClientError> {
        Ok(self
            .get_basket()
            .await?
            .into_success_data()
            .is_none_or(|basket| basket.items.is_empty()))
    }

    /// Basket total; zero when the backend returns no basket.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`get_basket`](Self::get_basket).
    pub async fn total(&self) -> Result<Decimal, ClientError> {
        Ok(self
            .get_basket()
            .await?
            .into_success_data()
            .map_or(Decimal::ZERO, |basket| basket.total))
    }

    /// Whether a token is cached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Whether the cached user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session().is_admin()
    }

    // ---- Wire calls shared with the bulk helpers ----

    async fn send_add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        let request = AddItemRequest {
            user_id,
            product_id,
            quantity,
            unit_price,
        };
        self.api.post("/basket/items", &request).await
    }

    async fn send_update(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<ApiResponse<Basket>, ClientError> {
        let query = QueryParams::new().push("product_id", product_id);
        self.api
            .put_with_query(
                "/basket/items",
                &query,
                &UpdateItemRequest { user_id, quantity },
            )
            .await
    }

    async fn send_remove(&self, product_id: ProductId) -> Result<ApiResponse<Basket>, ClientError> {
        self.api
            .delete(&format!("/basket/items/{product_id}"))
            .await
    }
}
