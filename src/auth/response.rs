use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope every auth endpoint answers with, on success and failure alike.
/// Domain failures arrive as `success: false` plus `message` and, for
/// validation problems, per-field `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
}

impl<T> ApiResponse<T> {
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.as_ref()?.get(field).map(String::as_str)
    }

    /// Server-reported field failures, ready for [`crate::Form::apply_errors`].
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flatten()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

/// Account fields the service reports. Extra properties are preserved so new
/// server fields survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default, rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Payload of a successful login, registration or token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user: User,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds. When absent, expiry is read from the access
    /// token itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Payload of a profile read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_decodes_session_data() {
        let body = r#"{
            "success": true,
            "message": "Login successful",
            "data": {
                "user": {
                    "id": "u-1",
                    "email": "user@example.com",
                    "username": "demo",
                    "fullName": "Demo User",
                    "avatarUrl": "https://cdn.example.com/u-1.png"
                },
                "accessToken": "token-a",
                "refreshToken": "token-r",
                "expiresIn": 900
            }
        }"#;

        let response: ApiResponse<SessionData> =
            serde_json::from_str(body).expect("envelope should decode");
        assert!(response.success);
        let data = response.data.expect("data should be present");
        assert_eq!(data.user.username, "demo");
        assert_eq!(data.user.full_name.as_deref(), Some("Demo User"));
        assert_eq!(
            data.user.extra.get("avatarUrl").and_then(|v| v.as_str()),
            Some("https://cdn.example.com/u-1.png")
        );
        assert_eq!(data.access_token, "token-a");
        assert_eq!(data.expires_in, Some(900));
    }

    #[test]
    fn failure_envelope_carries_field_errors() {
        let body = r#"{
            "success": false,
            "message": "Validation failed",
            "errors": {
                "email": "Email already registered",
                "username": "Username taken"
            }
        }"#;

        let response: ApiResponse<SessionData> =
            serde_json::from_str(body).expect("envelope should decode");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.field_error("email"), Some("Email already registered"));
        assert_eq!(response.field_error("password"), None);

        let mut fields: Vec<&str> = response.field_errors().map(|(field, _)| field).collect();
        fields.sort_unstable();
        assert_eq!(fields, ["email", "username"]);
    }

    #[test]
    fn request_bodies_use_the_wire_field_names() {
        let body = serde_json::to_value(ResetPasswordRequest {
            token: "reset-1",
            new_password: "secret1",
        })
        .expect("request should serialize");
        assert_eq!(body["token"], "reset-1");
        assert_eq!(body["newPassword"], "secret1");
    }
}
