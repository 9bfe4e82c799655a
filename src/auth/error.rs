use thiserror::Error;

/// Plumbing failures while talking to the auth service. Domain failures
/// (wrong password, taken username) are not errors; they come back inside
/// the [`crate::auth::ApiResponse`] envelope.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request never produced a readable response.
    #[error("network error during auth request: {0}")]
    Network(#[source] Box<ureq::Error>),

    /// The response body was not the JSON envelope we expect.
    #[error("malformed auth response: {0}")]
    Decode(#[from] std::io::Error),

    /// An error status whose body did not carry an envelope either.
    #[error("auth service answered status {status} without an envelope")]
    Status { status: u16 },

    /// A token refresh was asked for, but the session never got one.
    #[error("session has no refresh token")]
    NoRefreshToken,
}

impl AuthError {
    pub(crate) fn network(error: ureq::Error) -> Self {
        Self::Network(Box::new(error))
    }
}
