use crate::auth::config::ServiceConfig;
use crate::auth::error::AuthError;
use crate::auth::response::{
    ApiResponse, ForgotPasswordRequest, LoginRequest, ProfileData, RefreshRequest,
    ResetPasswordRequest, SessionData,
};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking wrappers over the auth endpoints.
///
/// Every call maps HTTP and JSON plumbing onto the service's uniform
/// envelope. An error status whose body still carries the envelope is a
/// domain result, returned as `Ok`; only transport and malformed-body
/// problems surface as [`AuthError`].
pub struct AuthClient {
    config: ServiceConfig,
    agent: ureq::Agent,
}

impl AuthClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_timeout(config, Duration::from_secs(10))
    }

    pub fn with_timeout(config: ServiceConfig, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { config, agent }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse<SessionData>, AuthError> {
        let body = LoginRequest { username, password };
        self.post_json(&self.config.endpoints.login, &body)
    }

    /// Registers an account from any serializable payload, typically the
    /// registration form's [`crate::FormValues`] snapshot.
    pub fn register(&self, user_data: &impl Serialize) -> Result<ApiResponse<SessionData>, AuthError> {
        self.post_json(&self.config.endpoints.register, user_data)
    }

    pub fn logout(&self, access_token: &str) -> Result<ApiResponse<serde_json::Value>, AuthError> {
        self.post_authed(&self.config.endpoints.logout, access_token)
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<ApiResponse<SessionData>, AuthError> {
        let body = RefreshRequest { refresh_token };
        self.post_json(&self.config.endpoints.refresh_token, &body)
    }

    pub fn profile(&self, access_token: &str) -> Result<ApiResponse<ProfileData>, AuthError> {
        self.get_authed(&self.config.endpoints.profile, access_token)
    }

    pub fn update_profile(
        &self,
        access_token: &str,
        changes: &impl Serialize,
    ) -> Result<ApiResponse<ProfileData>, AuthError> {
        self.put_json(&self.config.endpoints.profile, access_token, changes)
    }

    pub fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<ApiResponse<serde_json::Value>, AuthError> {
        let body = ForgotPasswordRequest { email };
        self.post_json(&self.config.endpoints.forgot_password, &body)
    }

    pub fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ApiResponse<serde_json::Value>, AuthError> {
        let body = ResetPasswordRequest {
            token,
            new_password,
        };
        self.post_json(&self.config.endpoints.reset_password, &body)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<ApiResponse<T>, AuthError> {
        let url = self.config.url(path);
        debug!("POST {url}");
        finish(self.agent.post(&url).send_json(body))
    }

    fn post_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<ApiResponse<T>, AuthError> {
        let url = self.config.url(path);
        debug!("POST {url}");
        finish(
            self.agent
                .post(&url)
                .set("Authorization", &bearer(access_token))
                .call(),
        )
    }

    fn get_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<ApiResponse<T>, AuthError> {
        let url = self.config.url(path);
        debug!("GET {url}");
        finish(
            self.agent
                .get(&url)
                .set("Authorization", &bearer(access_token))
                .call(),
        )
    }

    fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
        body: &impl Serialize,
    ) -> Result<ApiResponse<T>, AuthError> {
        let url = self.config.url(path);
        debug!("PUT {url}");
        finish(
            self.agent
                .put(&url)
                .set("Authorization", &bearer(access_token))
                .send_json(body),
        )
    }
}

fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

fn finish<T: DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ApiResponse<T>, AuthError> {
    match result {
        Ok(response) => Ok(response.into_json()?),
        Err(ureq::Error::Status(status, response)) => match response.into_json() {
            Ok(envelope) => {
                debug!("auth service answered {status} with an envelope");
                Ok(envelope)
            }
            Err(_) => Err(AuthError::Status { status }),
        },
        Err(error) => Err(AuthError::network(error)),
    }
}
