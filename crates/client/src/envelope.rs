//! The uniform `{ success, message, data }` response wrapper.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every backend response payload.
///
/// `message` defaults to an empty string when the backend omits it, and
/// `data` is omitted (never `null`) when serialized empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend reports the operation as successful.
    pub success: bool,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// Payload, present on success for endpoints that return one.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Envelope for endpoints that carry no typed payload.
///
/// Whatever `data` the backend sends (usually nothing or `null`) is kept
/// as raw JSON.
pub type EmptyResponse = ApiResponse<serde_json::Value>;

impl<T> ApiResponse<T> {
    /// Build a successful envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope without data.
    ///
    /// Used for results synthesized client-side, such as a bulk helper
    /// called with an empty list.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Whether the envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Borrow the payload.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Take the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Take the payload only when the envelope reports success.
    #[must_use]
    pub fn into_success_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_and_message_default() {
        let envelope: ApiResponse<u32> =
            serde_json::from_str(r#"{"success":true}"#).expect("deserialize");
        assert!(envelope.is_success());
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_null_data_is_none() {
        let envelope: ApiResponse<()> =
            serde_json::from_str(r#"{"success":true,"message":"User deleted","data":null}"#)
                .expect("deserialize");
        assert_eq!(envelope.message, "User deleted");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_failure_serializes_without_data() {
        let envelope: ApiResponse<u32> = ApiResponse::failure("Failed to add items");
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Failed to add items"})
        );
    }

    #[test]
    fn test_into_success_data_ignores_failed_envelopes() {
        let envelope = ApiResponse {
            success: false,
            message: "nope".to_string(),
            data: Some(3),
        };
        assert_eq!(envelope.into_success_data(), None);
        assert_eq!(ApiResponse::ok("yes", 4).into_success_data(), Some(4));
    }
}
