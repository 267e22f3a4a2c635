mod auth;
mod error_handler;

pub use auth::{AuthGate, auth_middleware, protect};
pub use error_handler::log_errors;
