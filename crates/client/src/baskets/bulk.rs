//! Multi-item basket helpers.
//!
//! The default helpers send one request per item, strictly in order, and
//! stop at the first error: earlier items stay applied, later items are
//! never sent, and the error is returned as-is. On success they return
//! the last response. An empty list yields a failure envelope without
//! any request.
//!
//! [`BasketService::add_items_best_effort`] is the variant that keeps
//! going past failures and reports every outcome.

use ddd_micro_core::ProductId;
use tracing::{debug, instrument, warn};

use super::{Basket, BasketService, ItemQuantity, NewItem};
use crate::envelope::ApiResponse;
use crate::error::ClientError;

/// Outcome of one item in a best-effort batch.
#[derive(Debug)]
pub struct ItemOutcome {
    pub product_id: ProductId,
    pub result: Result<ApiResponse<Basket>, ClientError>,
}

impl ItemOutcome {
    /// Whether the request succeeded and the backend reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(ApiResponse::is_success)
    }
}

/// Per-item results of a best-effort batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per attempted item, in submission order.
    pub outcomes: Vec<ItemOutcome>,
    /// Items never attempted because the session was rejected.
    pub skipped: Vec<ProductId>,
}

impl BatchReport {
    /// Number of items that succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Outcomes that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Whether every item was attempted and succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(ItemOutcome::is_success)
    }

    /// Basket state after the last successful item.
    #[must_use]
    pub fn last_basket(&self) -> Option<&Basket> {
        self.outcomes
            .iter()
            .rev()
            .filter_map(|o| o.result.as_ref().ok())
            .find_map(ApiResponse::data)
    }
}

impl BasketService {
    /// Add several items, one request each, aborting on the first error.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise the first
    /// request error; items after it are not sent.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn add_items(&self, items: &[NewItem]) -> Result<ApiResponse<Basket>, ClientError> {
        let user = self.current_user()?;

        let mut last = None;
        for item in items {
            debug!(product_id = %item.product_id, "Adding item");
            last = Some(
                self.send_add(user.id, item.product_id, item.quantity, item.unit_price)
                    .await?,
            );
        }
        Ok(last.unwrap_or_else(|| ApiResponse::failure("Failed to add items")))
    }

    /// Change several quantities, one request each, aborting on the first error.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise the first
    /// request error; items after it are not sent.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn update_items(
        &self,
        items: &[ItemQuantity],
    ) -> Result<ApiResponse<Basket>, ClientError> {
        let user = self.current_user()?;

        let mut last = None;
        for item in items {
            debug!(product_id = %item.product_id, "Updating item");
            last = Some(
                self.send_update(user.id, item.product_id, item.quantity)
                    .await?,
            );
        }
        Ok(last.unwrap_or_else(|| ApiResponse::failure("Failed to update items")))
    }

    /// Remove several products, one request each, aborting on the first error.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise the first
    /// request error; items after it are not sent.
    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    pub async fn remove_items(
        &self,
        product_ids: &[ProductId],
    ) -> Result<ApiResponse<Basket>, ClientError> {
        self.current_user()?;

        let mut last = None;
        for &product_id in product_ids {
            debug!(%product_id, "Removing item");
            last = Some(self.send_remove(product_id).await?);
        }
        Ok(last.unwrap_or_else(|| ApiResponse::failure("Failed to remove items")))
    }

    /// Add several items, one request each, continuing past failures.
    ///
    /// Only a 401 stops the batch, since the session is gone and every
    /// remaining request would be rejected too; the rest are listed in
    /// [`BatchReport::skipped`]. Nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session. Per-item failures are
    /// reported in the [`BatchReport`].
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn add_items_best_effort(
        &self,
        items: &[NewItem],
    ) -> Result<BatchReport, ClientError> {
        let user = self.current_user()?;

        let mut report = BatchReport::default();
        let mut remaining = items.iter();
        for item in remaining.by_ref() {
            let result = self
                .send_add(user.id, item.product_id, item.quantity, item.unit_price)
                .await;
            let unauthorized = matches!(result, Err(ClientError::Unauthorized { .. }));
            if let Err(e) = &result {
                warn!(product_id = %item.product_id, error = %e, "Item failed");
            }
            report.outcomes.push(ItemOutcome {
                product_id: item.product_id,
                result,
            });
            if unauthorized {
                break;
            }
        }
        report.skipped = remaining.map(|item| item.product_id).collect();
        Ok(report)
    }
}
