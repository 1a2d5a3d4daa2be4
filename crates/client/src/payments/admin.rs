//! Admin payment, refund and analytics operations.

use ddd_micro_core::{PaymentId, PaymentStatus, RefundId, StatsPeriod};
use tracing::instrument;

use super::{
    AdminListPaymentsParams, AdminListRefundsParams, CreateRefundRequest, ListPaymentsResponse,
    ListRefundsResponse, Payment, PaymentService, PaymentStatsResponse, Refund, RefundResponse,
    UpdatePaymentStatusRequest,
};
use crate::envelope::ApiResponse;
use crate::error::ClientError;
use crate::query::QueryParams;

impl PaymentService {
    /// List payments across all users.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn admin_list_payments(
        &self,
        params: &AdminListPaymentsParams,
    ) -> Result<ApiResponse<ListPaymentsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .get_with_query("/admin/payments", &params.to_query())
            .await
    }

    /// Fetch any payment.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn admin_get_payment(
        &self,
        id: &PaymentId,
    ) -> Result<ApiResponse<Payment>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/admin/payments/{id}")).await
    }

    /// Override a payment's status.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, reason), fields(payment_id = %id, status = %status))]
    pub async fn admin_update_payment_status(
        &self,
        id: &PaymentId,
        status: PaymentStatus,
        reason: Option<String>,
    ) -> Result<ApiResponse<Payment>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .put(
                &format!("/admin/payments/{id}/status"),
                &UpdatePaymentStatusRequest { status, reason },
            )
            .await
    }

    /// List refunds across all users.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn admin_list_refunds(
        &self,
        params: &AdminListRefundsParams,
    ) -> Result<ApiResponse<ListRefundsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .get_with_query("/admin/refunds", &params.to_query())
            .await
    }

    /// Issue a refund on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(payment_id = %request.payment_id))]
    pub async fn admin_create_refund(
        &self,
        request: &CreateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/admin/refunds", request).await
    }

    /// Fetch any refund.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(refund_id = %id))]
    pub async fn admin_get_refund(&self, id: &RefundId) -> Result<ApiResponse<Refund>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/admin/refunds/{id}")).await
    }

    /// Push a pending refund through the provider.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(refund_id = %id))]
    pub async fn admin_process_refund(
        &self,
        id: &RefundId,
    ) -> Result<ApiResponse<Refund>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post_empty(&format!("/admin/refunds/{id}/process"))
            .await
    }

    /// Payment aggregates for one period.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(period = %period))]
    pub async fn payment_stats(
        &self,
        period: StatsPeriod,
    ) -> Result<ApiResponse<PaymentStatsResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        let query = QueryParams::new().push("period", period);
        self.api
            .get_with_query("/admin/analytics/payments", &query)
            .await
    }
}
