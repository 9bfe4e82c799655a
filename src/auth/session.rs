use crate::auth::client::AuthClient;
use crate::auth::error::AuthError;
use crate::auth::response::{ApiResponse, SessionData, User};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::{debug, warn};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Auth state for one app instance: the signed-in user plus their tokens.
/// One owner holds the session and hands it to whichever screen needs it.
#[derive(Default)]
pub struct AuthSession {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<SystemTime>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from persisted tokens, e.g. at app start. The user
    /// stays unknown until [`AuthSession::sync_user`] fetches the profile.
    pub fn restore(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        let access_token = access_token.into();
        Self {
            user: None,
            expires_at: token_expiry(&access_token),
            access_token: Some(access_token),
            refresh_token,
        }
    }

    /// Adopts the payload of a successful login, registration or refresh.
    /// A missing refresh token keeps the one already held.
    pub fn establish(&mut self, data: SessionData) {
        debug!("session established for {}", data.user.username);
        self.expires_at = data
            .expires_in
            .map(|seconds| SystemTime::now() + Duration::from_secs(seconds))
            .or_else(|| token_expiry(&data.access_token));
        self.user = Some(data.user);
        self.access_token = Some(data.access_token);
        if data.refresh_token.is_some() {
            self.refresh_token = data.refresh_token;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn update_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && !self.is_expired()
    }

    /// A session with unknown expiry is treated as not expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| SystemTime::now() >= expires_at)
    }

    pub fn expires_within(&self, window: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires_at| SystemTime::now() + window >= expires_at)
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Signs in and, on success, adopts the returned session. The envelope
    /// is handed back either way so screens can surface its message.
    pub fn sign_in(
        &mut self,
        client: &AuthClient,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse<SessionData>, AuthError> {
        let response = client.login(username, password)?;
        if response.success
            && let Some(data) = response.data.as_ref()
        {
            self.establish(data.clone());
        }
        Ok(response)
    }

    /// Tells the server goodbye and clears local state. The local session is
    /// dropped even when the server call fails; the error is still returned.
    pub fn sign_out(&mut self, client: &AuthClient) -> Result<(), AuthError> {
        let result = match self.access_token.as_deref() {
            Some(token) => client.logout(token).map(|_| ()),
            None => Ok(()),
        };
        if let Err(error) = &result {
            warn!("logout request failed, clearing local session anyway: {error}");
        }
        self.clear();
        result
    }

    /// Trades the refresh token for fresh credentials.
    pub fn refresh_tokens(
        &mut self,
        client: &AuthClient,
    ) -> Result<ApiResponse<SessionData>, AuthError> {
        let Some(refresh_token) = self.refresh_token.clone() else {
            return Err(AuthError::NoRefreshToken);
        };
        let response = client.refresh(&refresh_token)?;
        if response.success
            && let Some(data) = response.data.as_ref()
        {
            self.establish(data.clone());
        }
        Ok(response)
    }

    /// Re-reads the profile for the held token. Returns false when there is
    /// no token or the server no longer accepts it; a rejected token clears
    /// the session.
    pub fn sync_user(&mut self, client: &AuthClient) -> Result<bool, AuthError> {
        let Some(token) = self.access_token.clone() else {
            return Ok(false);
        };
        let response = client.profile(&token)?;
        if response.success
            && let Some(data) = response.data.as_ref()
        {
            self.user = Some(data.user.clone());
            Ok(true)
        } else {
            debug!("profile read rejected, dropping session");
            self.clear();
            Ok(false)
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user.as_ref().map(|user| user.username.as_str()))
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Reads the `exp` claim out of a JWT's payload segment. Opaque tokens have
/// unknown expiry.
fn token_expiry(token: &str) -> Option<SystemTime> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_u64()?;
    Some(UNIX_EPOCH + Duration::from_secs(exp))
}
