//! Dashboard views of the leave management client
//!
//! Typed repositories over the authenticated [`auth::RequestGateway`], the
//! employee and admin dashboards built on them, and plain-text rendering
//! used by the `leave-client` binary.

pub mod error;
pub mod models;
pub mod render;
pub mod repositories;
pub mod state;
pub mod views;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use views::{AdminDashboard, EmployeeDashboard};
