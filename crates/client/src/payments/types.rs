//! Payment API request and response types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ddd_micro_core::{
    OrderId, PaymentId, PaymentMethodId, PaymentMethodKind, PaymentMethodType, PaymentStatus,
    RefundId, RefundStatus, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::query::QueryParams;

/// Arbitrary JSON object exchanged with the payment gateway.
pub type GatewayData = BTreeMap<String, serde_json::Value>;

/// A payment against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethodKind,
    pub payment_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_response: Option<GatewayData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A saved card or bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four_digits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<u16>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A refund against a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub id: RefundId,
    pub payment_id: PaymentId,
    pub amount: Decimal,
    pub reason: String,
    pub status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body for `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePaymentRequest {
    pub order_id: OrderId,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethodKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Body for `POST /payments/:id/process`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessPaymentRequest {
    pub payment_method_id: PaymentMethodId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_data: Option<GatewayData>,
}

/// Body for `POST /refunds` and `POST /admin/refunds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRefundRequest {
    pub payment_id: PaymentId,
    pub amount: Decimal,
    pub reason: String,
}

/// Body for `POST /payment-methods`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AddPaymentMethodRequest {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub provider: String,
    /// Provider-issued token for the instrument.
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl std::fmt::Debug for AddPaymentMethodRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddPaymentMethodRequest")
            .field("method_type", &self.method_type)
            .field("provider", &self.provider)
            .field("token", &"[REDACTED]")
            .field("is_default", &self.is_default)
            .finish()
    }
}

/// Body for `PUT /payment-methods/:id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdatePaymentMethodRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for `PUT /admin/payments/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A payment plus what the caller needs to finish an external checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment: Payment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Wrapper around a single payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    pub payment_method: PaymentMethod,
}

/// Wrapper around a single refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResponse {
    pub refund: Refund,
}

/// A page of payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPaymentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<Payment>,
    pub total: u64,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

/// A page of refunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRefundsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub refunds: Vec<Refund>,
    pub total: u64,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

/// All of the user's saved payment methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaymentMethodsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_methods: Vec<PaymentMethod>,
    pub total: u64,
}

/// Aggregates over one analytics period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatsResponse {
    pub total_payments: u64,
    pub total_amount: Decimal,
    pub successful_payments: u64,
    pub failed_payments: u64,
    pub pending_payments: u64,
    pub refunded_amount: Decimal,
    #[serde(alias = "average_payment_amount")]
    pub average_amount: Decimal,
}

/// Filters for `GET /payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPaymentsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethodKind>,
}

impl ListPaymentsParams {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("status", self.status)
            .push_opt("payment_method", self.payment_method)
    }
}

/// Filters for `GET /refunds`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRefundsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<RefundStatus>,
}

impl ListRefundsParams {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("status", self.status)
    }
}

/// Filters for `GET /admin/payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminListPaymentsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<PaymentStatus>,
    pub user_id: Option<UserId>,
    pub payment_method: Option<PaymentMethodKind>,
    /// Passed through as given, e.g. `2024-01-31`.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AdminListPaymentsParams {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("status", self.status)
            .push_opt("user_id", self.user_id)
            .push_opt("payment_method", self.payment_method)
            .push_opt("start_date", self.start_date.as_deref())
            .push_opt("end_date", self.end_date.as_deref())
    }
}

/// Filters for `GET /admin/refunds`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminListRefundsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<RefundStatus>,
    pub user_id: Option<UserId>,
    pub payment_id: Option<PaymentId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AdminListRefundsParams {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("status", self.status)
            .push_opt("user_id", self.user_id)
            .push_opt("payment_id", self.payment_id.as_ref())
            .push_opt("start_date", self.start_date.as_deref())
            .push_opt("end_date", self.end_date.as_deref())
    }
}
