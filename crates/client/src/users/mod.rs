//! User service: registration, login, profile and admin account management.
//!
//! Login and refresh are the only writers of the session besides logout
//! and 401 eviction. A successful login stores the token and the user
//! snapshot together; refresh replaces only the token.

mod types;

pub use types::*;

use ddd_micro_core::{Role, UserId};
use secrecy::SecretString;
use tracing::{info, instrument};

use crate::envelope::{ApiResponse, EmptyResponse};
use crate::error::ClientError;
use crate::http::{Access, ApiClient};
use crate::session::Session;

/// Client for the `/users` and `/admin/users` endpoints.
#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    /// Create a service over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    // ---- Public endpoints ----

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: &CreateUserRequest,
    ) -> Result<ApiResponse<User>, ClientError> {
        self.api
            .post_as("/users/register", request, Access::Public)
            .await
    }

    /// Authenticate and cache the returned token and user.
    ///
    /// Storage is only written when the backend reports success with a
    /// payload; a rejected login leaves any previous session in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credentials are rejected,
    /// or the session cannot be persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ClientError> {
        let response: ApiResponse<LoginResponse> = self
            .api
            .post_as("/users/login", request, Access::Public)
            .await?;

        if let Some(login) = response.data().filter(|_| response.is_success()) {
            self.session().store_login(&login.token, &login.user)?;
            info!(user_id = %login.user.id, "Logged in");
        }
        Ok(response)
    }

    /// Exchange a refresh token for a new access token and cache it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the refresh token is rejected,
    /// or the session cannot be persisted.
    #[instrument(skip_all)]
    pub async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<ApiResponse<TokenResponse>, ClientError> {
        let response: ApiResponse<TokenResponse> = self
            .api
            .post_as("/users/refresh-token", request, Access::Public)
            .await?;

        if let Some(token) = response.data().filter(|_| response.is_success()) {
            self.session().store_token(&token.token)?;
        }
        Ok(response)
    }

    // ---- Authenticated user endpoints ----

    /// Fetch the signed-in user's profile from the backend.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<ApiResponse<User>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get("/users/profile").await
    }

    /// Update the signed-in user's name.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        request: &UpdateUserRequest,
    ) -> Result<ApiResponse<User>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.put("/users/profile", request).await
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<EmptyResponse, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.post("/users/change-password", request).await
    }

    // ---- Admin endpoints ----

    /// List accounts.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        params: &ListUsersParams,
    ) -> Result<ApiResponse<ListUsersResponse>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .get_with_query("/admin/users", &params.to_query())
            .await
    }

    /// Fetch one account.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<ApiResponse<User>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.get(&format!("/admin/users/{id}")).await
    }

    /// Update an account's name, role or active flag.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self, request), fields(user_id = %id))]
    pub async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserByAdminRequest,
    ) -> Result<ApiResponse<User>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.put(&format!("/admin/users/{id}"), request).await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<EmptyResponse, ClientError> {
        self.session().ensure_authenticated()?;
        self.api.delete(&format!("/admin/users/{id}")).await
    }

    /// Assign a role to an account.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any request error.
    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    pub async fn assign_role(&self, id: UserId, role: Role) -> Result<ApiResponse<User>, ClientError> {
        self.session().ensure_authenticated()?;
        self.api
            .post(
                &format!("/admin/users/{id}/assign-role"),
                &AssignRoleRequest { role },
            )
            .await
    }

    // ---- Local helpers (no network) ----

    /// Forget the cached token and user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// The cached user snapshot.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session().current_user()
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

    /// The cached bearer token.
    #[must_use]
    pub fn auth_token(&self) -> Option<SecretString> {
        self.session().token()
    }
}

/// Fixed user for unit tests elsewhere in the crate.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn test_user(id: u64, role: Role) -> User {
    use chrono::{TimeZone, Utc};

    let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    User {
        id: UserId::new(id),
        email: ddd_micro_core::Email::parse("jane@example.com").unwrap(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        role,
        is_active: true,
        created_at: at,
        updated_at: at,
    }
}
