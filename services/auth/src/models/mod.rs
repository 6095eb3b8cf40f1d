//! Client-side models

pub mod response;
pub mod role;
pub mod session;
pub mod user;

// Re-export for convenience
pub use response::ApiResponse;
pub use role::{Role, UnknownRole};
pub use session::Session;
pub use user::{CurrentUser, LoginCredentials, LoginResponse, RegisterRequest, RegistrationForm};
