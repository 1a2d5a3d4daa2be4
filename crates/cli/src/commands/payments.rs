//! Payment commands.
//!
//! # Usage
//!
//! ```bash
//! micro-cli payments list --limit 10
//! micro-cli payments get pay_123
//!
//! # Requires an admin session
//! micro-cli payments stats --period yearly
//! ```

use ddd_micro_client::ShopClient;
use ddd_micro_client::payments::ListPaymentsParams;
use ddd_micro_core::{PaymentId, StatsPeriod};

use super::{CliError, print_json};

/// List the signed-in user's payments.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn list(shop: &ShopClient, offset: Option<u32>, limit: Option<u32>) -> Result<(), CliError> {
    let params = ListPaymentsParams {
        offset,
        limit,
        ..Default::default()
    };
    let response = shop.payments().list_payments(&params).await?;
    print_json(&response)
}

/// Show one payment.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn get(shop: &ShopClient, id: &PaymentId) -> Result<(), CliError> {
    let response = shop.payments().get_payment(id).await?;
    print_json(&response)
}

/// Payment analytics for `period`.
///
/// # Errors
///
/// Returns an error without a session or if the request fails.
pub async fn stats(shop: &ShopClient, period: StatsPeriod) -> Result<(), CliError> {
    let response = shop.payments().payment_stats(period).await?;
    print_json(&response)
}
