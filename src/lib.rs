pub mod auth;
pub mod core;
pub mod forms;
pub mod runtime;
pub mod state;

pub use crate::core::FieldId;
pub use crate::core::context::FormValues;
pub use crate::core::field::{FieldState, ValidationState};
pub use crate::core::rule::{ErrorMessage, FieldRule, FormConfig, MessageFn, ValidateFn};
pub use crate::core::validators;
pub use crate::core::value::Value;

pub use crate::state::form::{DEFAULT_DEBOUNCE, Form};

pub use crate::runtime::event::FormEvent;
pub use crate::runtime::runner::FormRunner;
pub use crate::runtime::scheduler::{Scheduler, SchedulerCommand};

pub use crate::auth::client::AuthClient;
pub use crate::auth::config::{AuthEndpoints, ServiceConfig};
pub use crate::auth::error::AuthError;
pub use crate::auth::response::{ApiResponse, ProfileData, SessionData, User};
pub use crate::auth::session::AuthSession;
