pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod session;

pub use client::AuthClient;
pub use config::{AuthEndpoints, ServiceConfig};
pub use error::AuthError;
pub use response::{ApiResponse, ProfileData, SessionData, User};
pub use session::AuthSession;
