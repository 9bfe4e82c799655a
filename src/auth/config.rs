use serde::{Deserialize, Serialize};

/// Where the auth service lives. The default points at a local development
/// deployment; hosts override `base_url` per environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default)]
    pub endpoints: AuthEndpoints,
}

/// Route table of the auth API, relative to the base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEndpoints {
    pub login: String,
    pub register: String,
    pub logout: String,
    pub refresh_token: String,
    pub profile: String,
    pub forgot_password: String,
    pub reset_password: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            register: "/auth/register".to_string(),
            logout: "/auth/logout".to_string(),
            refresh_token: "/auth/refresh-token".to_string(),
            profile: "/auth/profile".to_string(),
            forgot_password: "/auth/forgot-password".to_string(),
            reset_password: "/auth/reset-password".to_string(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api/v1")
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints: AuthEndpoints::default(),
        }
    }

    /// Joins an endpoint path onto the base URL, tolerating a trailing slash.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
