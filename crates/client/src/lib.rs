//! Typed async client for the DDD Micro e-commerce backends.
//!
//! Four services wrap the user, product, basket and payment REST APIs.
//! They share one [`ApiClient`] per backend host, which attaches the cached
//! bearer token and clears the session when the backend answers 401.
//!
//! ```no_run
//! use ddd_micro_client::{ClientConfig, ShopClient};
//! use ddd_micro_client::users::LoginRequest;
//! use ddd_micro_core::Email;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let shop = ShopClient::in_memory(&ClientConfig::from_env()?)?;
//! shop.users()
//!     .login(&LoginRequest {
//!         email: Email::parse("jane@example.com")?,
//!         password: "correct horse".to_string(),
//!     })
//!     .await?;
//! let basket = shop.baskets().get_basket().await?;
//! println!("{} items", basket.into_data().map_or(0, |b| b.item_count));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod baskets;
pub mod config;
mod de;
pub mod envelope;
pub mod error;
pub mod http;
pub mod payments;
pub mod products;
pub mod query;
pub mod redirect;
pub mod session;
mod shop;
pub mod users;

pub use baskets::BasketService;
pub use config::{ClientConfig, ConfigError};
pub use envelope::{ApiResponse, EmptyResponse};
pub use error::ClientError;
pub use http::{Access, ApiClient};
pub use payments::PaymentService;
pub use products::ProductService;
pub use query::QueryParams;
pub use redirect::{LogRedirect, LoginRedirect};
pub use session::{FileStore, MemoryStore, Session, SessionError, SessionStore};
pub use shop::ShopClient;
pub use users::UserService;
