//! Entry point bundling all four services over one session.

use std::sync::Arc;

use tracing::debug;

use crate::baskets::BasketService;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::payments::PaymentService;
use crate::products::ProductService;
use crate::redirect::{LogRedirect, LoginRedirect};
use crate::session::{MemoryStore, Session, SessionStore};
use crate::users::UserService;

/// All backend services sharing one session and redirect hook.
///
/// Users, products and baskets go to [`ClientConfig::api_url`]; payments
/// go to [`ClientConfig::payment_api_url`]. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ShopClient {
    session: Session,
    users: UserService,
    products: ProductService,
    baskets: BasketService,
    payments: PaymentService,
}

impl ShopClient {
    /// Build every service from `config` over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ClientError> {
        let session = Session::new(store);
        let main = ApiClient::new(
            &config.api_url,
            session.clone(),
            Arc::clone(&redirect),
            config.login_path.clone(),
        )?;
        let payment = ApiClient::new(
            &config.payment_api_url,
            session.clone(),
            redirect,
            config.login_path.clone(),
        )?;
        debug!(api = main.api_root(), payments = payment.api_root(), "Shop client ready");

        Ok(Self {
            session,
            users: UserService::new(main.clone()),
            products: ProductService::new(main.clone()),
            baskets: BasketService::new(main),
            payments: PaymentService::new(payment),
        })
    }

    /// Client with an in-memory session and the logging redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn in_memory(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config, Arc::new(MemoryStore::new()), Arc::new(LogRedirect))
    }

    /// User and auth operations.
    #[must_use]
    pub const fn users(&self) -> &UserService {
        &self.users
    }

    /// Catalog operations.
    #[must_use]
    pub const fn products(&self) -> &ProductService {
        &self.products
    }

    /// Basket operations.
    #[must_use]
    pub const fn baskets(&self) -> &BasketService {
        &self.baskets
    }

    /// Payment, refund and payment-method operations.
    #[must_use]
    pub const fn payments(&self) -> &PaymentService {
        &self.payments
    }

    /// The shared session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::users::test_user;

    #[test]
    fn test_services_share_one_session() {
        let config = ClientConfig::new("http://localhost:8081")
            .unwrap()
            .with_payment_api_url("http://localhost:8084")
            .unwrap();
        let shop = ShopClient::in_memory(&config).unwrap();

        shop.session()
            .store_login("jwt", &test_user(1, ddd_micro_core::Role::Admin))
            .unwrap();

        assert!(shop.users().is_authenticated());
        assert!(shop.baskets().is_admin());
        assert!(shop.users().current_user().is_some());
    }
}
