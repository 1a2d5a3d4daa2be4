//! Account commands: login, logout, whoami, register.
//!
//! # Usage
//!
//! ```bash
//! # Password may also come from SHOP_PASSWORD
//! micro-cli login --email jane@example.com --password 'correct horse'
//! micro-cli whoami
//! micro-cli logout
//!
//! micro-cli register -e new@example.com -p secret --first-name New --last-name User
//! ```

use ddd_micro_client::ShopClient;
use ddd_micro_client::users::{CreateUserRequest, LoginRequest};
use ddd_micro_core::Email;
use tracing::info;

use super::{CliError, print_json};

/// Sign in and persist the session.
///
/// # Errors
///
/// Returns an error if the email is malformed or the login request fails.
pub async fn login(shop: &ShopClient, email: &str, password: String) -> Result<(), CliError> {
    let request = LoginRequest {
        email: Email::parse(email)?,
        password,
    };
    let response = shop.users().login(&request).await?;

    // Only the user is echoed; the token stays in the session file.
    match response.data() {
        Some(login) if response.is_success() => {
            info!(user = %login.user.email, "Signed in");
            print_json(&login.user)
        }
        _ => print_json(&response),
    }
}

/// Drop the persisted session.
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub fn logout(shop: &ShopClient) -> Result<(), CliError> {
    shop.users().logout()?;
    info!("Signed out");
    Ok(())
}

/// Print the cached user snapshot.
///
/// # Errors
///
/// Returns `NotAuthenticated` when no session is cached.
pub fn whoami(shop: &ShopClient) -> Result<(), CliError> {
    let user = shop.session().require_user()?;
    print_json(&user)
}

/// Create an account. Does not sign in.
///
/// # Errors
///
/// Returns an error if the email is malformed or the request fails.
pub async fn register(
    shop: &ShopClient,
    email: &str,
    password: String,
    first_name: String,
    last_name: String,
) -> Result<(), CliError> {
    let request = CreateUserRequest {
        email: Email::parse(email)?,
        password,
        first_name,
        last_name,
    };
    let response = shop.users().register(&request).await?;
    print_json(&response)
}
