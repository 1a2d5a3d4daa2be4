//! User API request and response types.

use chrono::{DateTime, Utc};
use ddd_micro_core::{Email, Role, UserId};
use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// An account as rendered by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// `first last`, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body for `POST /users/register`.
#[derive(Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: Email,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Body for `POST /users/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: Email,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Payload of a successful login.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Body for `POST /users/refresh-token`.
#[derive(Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Payload of a successful token refresh.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Body for `PUT /users/profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Body for `PUT /admin/users/:id`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserByAdminRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for `POST /admin/users/:id/assign-role`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AssignRoleRequest {
    pub role: Role,
}

/// Body for `POST /users/change-password`.
#[derive(Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .finish_non_exhaustive()
    }
}

/// Filters for `GET /admin/users`.
#[derive(Debug, Clone, Default)]
pub struct ListUsersParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListUsersParams {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
            .push_opt("search", self.search.as_deref())
    }
}

/// A page of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "jane@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "role": "admin",
            "is_active": true,
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-16T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id, UserId::new(7));
        assert!(user.role.is_admin());
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = UpdateUserByAdminRequest {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"is_active": false})
        );
    }

    #[test]
    fn test_list_params_skip_missing_filters() {
        let params = ListUsersParams {
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(params.to_query().encode(), "limit=50");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let login = LoginRequest {
            email: Email::parse("jane@example.com").unwrap(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{login:?}").contains("hunter2"));

        let change = ChangePasswordRequest {
            current_password: "old-pass".to_string(),
            new_password: "new-pass".to_string(),
        };
        let debug = format!("{change:?}");
        assert!(!debug.contains("old-pass"));
        assert!(!debug.contains("new-pass"));
    }
}
