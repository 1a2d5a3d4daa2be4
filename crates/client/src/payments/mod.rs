//! Payment service: payments, refunds and saved payment methods.
//!
//! Talks to the payment backend, which may live on its own host (see
//! [`ClientConfig::payment_api_url`](crate::ClientConfig::payment_api_url)).
//! Every operation requires a session. Admin operations are in [`admin`].

mod admin;
mod types;

pub use types::*;

use ddd_micro_core::{PaymentId, PaymentMethodId, RefundId};
use tracing::instrument;

use crate::envelope::{ApiResponse, EmptyResponse};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

/// Client for the `/payments`, `/refunds`, `/payment-methods` and payment
/// admin endpoints.
#[derive(Debug, Clone)]
pub struct PaymentService {
    api: ApiClient,
}

impl PaymentService {
    /// Create a service over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    // ---- Payments ----

    /// Start a payment for an order.
    ///
    /// The response may carry a `payment_url` or `client_secret` for
    /// completing checkout with the provider.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/payments", request).await
    }

    /// Confirm a pending payment with a saved method.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(payment_id = %id))]
    pub async fn process_payment(
        &self,
        id: &PaymentId,
        request: &ProcessPaymentRequest,
    ) -> Result<ApiResponse<Payment>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post(&format!("/payments/{id}/process"), request)
            .await
    }

    /// Fetch one of the user's payments.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn get_payment(&self, id: &PaymentId) -> Result<ApiResponse<Payment>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/payments/{id}")).await
    }

    /// List the user's payments.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<ApiResponse<ListPaymentsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .get_with_query("/payments", &params.to_query())
            .await
    }

    /// Cancel a payment that has not completed.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn cancel_payment(&self, id: &PaymentId) -> Result<ApiResponse<Payment>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/payments/{id}/cancel"))
            .await
    }

    // ---- Refunds ----

    /// Request a refund.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(payment_id = %request.payment_id))]
    pub async fn create_refund(
        &self,
        request: &CreateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/refunds", request).await
    }

    /// Fetch one of the user's refunds.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(refund_id = %id))]
    pub async fn get_refund(&self, id: &RefundId) -> Result<ApiResponse<Refund>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/refunds/{id}")).await
    }

    /// List the user's refunds.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn list_refunds(
        &self,
        params: &ListRefundsParams,
    ) -> Result<ApiResponse<ListRefundsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .get_with_query("/refunds", &params.to_query())
            .await
    }

    // ---- Payment methods ----

    /// Save a card or bank account.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(provider = %request.provider))]
    pub async fn add_payment_method(
        &self,
        request: &AddPaymentMethodRequest,
    ) -> Result<ApiResponse<PaymentMethodResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/payment-methods", request).await
    }

    /// List saved payment methods.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn list_payment_methods(
        &self,
    ) -> Result<ApiResponse<ListPaymentMethodsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get("/payment-methods").await
    }

    /// Change the default or active flag of a saved method.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_method_id = %id))]
    pub async fn update_payment_method(
        &self,
        id: &PaymentMethodId,
        request: &UpdatePaymentMethodRequest,
    ) -> Result<ApiResponse<PaymentMethodResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .put(&format!("/payment-methods/{id}"), request)
            .await
    }

    /// Delete a saved method.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_method_id = %id))]
    pub async fn delete_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<EmptyResponse, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.delete(&format!("/payment-methods/{id}")).await
    }

    /// Make a saved method the default.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_method_id = %id))]
    pub async fn set_default_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<ApiResponse<PaymentMethodResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/payment-methods/{id}/set-default"))
            .await
    }
}
