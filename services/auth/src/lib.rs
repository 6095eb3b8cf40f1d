//! Session and authentication core of the leave management client
//!
//! The crate owns the client-side session lifecycle: a [`SessionStore`]
//! over a persistent storage area, the [`SessionPolicy`] deciding expiry,
//! the [`RequestGateway`] every authenticated call goes through, and the
//! [`AccessGuard`] each page runs before rendering.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use auth::{AccessGuard, ClientConfig, Role, SessionStore, SystemClock};
//! use common::MemoryStorage;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let store = SessionStore::new(Arc::new(MemoryStorage::new()));
//! let guard = AccessGuard::new(store, Arc::new(SystemClock), config.request_policy());
//!
//! let decision = guard.check(&[Role::Employee]).await?;
//! if let Some(page) = decision.redirect_target() {
//!     println!("redirecting to {page}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod policy;
pub mod session;
pub mod sweep;
pub mod validation;

pub use client::AuthClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, StorageKind};
pub use error::{AuthError, AuthResult};
pub use gateway::RequestGateway;
pub use guard::{AccessDecision, AccessGuard, Denial};
pub use models::{ApiResponse, CurrentUser, Role, Session};
pub use navigation::Page;
pub use policy::SessionPolicy;
pub use session::SessionStore;
pub use sweep::{SessionEvent, SessionSweeper, SweepOutcome};
