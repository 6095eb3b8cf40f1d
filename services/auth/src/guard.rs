//! Page-entry access guard
//!
//! Runs once before a page's view logic. The outcome is a value, never a
//! navigation side effect; callers follow [`AccessDecision::redirect_target`].

use std::sync::Arc;

use common::error::StorageResult;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::models::{Role, Session};
use crate::navigation::Page;
use crate::policy::SessionPolicy;
use crate::session::SessionStore;

/// Why entry was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No token stored
    NoToken,
    /// Inactivity timeout exceeded; session destroyed
    Expired,
    /// Role is not allowed on this page
    WrongRole {
        /// Role found in the session, if any
        actual: Option<Role>,
        /// Whether the session was destroyed
        session_cleared: bool,
    },
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed(Session),
    Denied(Denial),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed(_))
    }

    /// Session the page may use when entry was allowed
    pub fn session(&self) -> Option<&Session> {
        match self {
            AccessDecision::Allowed(session) => Some(session),
            AccessDecision::Denied(_) => None,
        }
    }

    /// Where the view layer should go instead of rendering
    pub fn redirect_target(&self) -> Option<Page> {
        match self {
            AccessDecision::Allowed(_) => None,
            AccessDecision::Denied(Denial::WrongRole {
                actual: Some(role),
                session_cleared: false,
            }) => Some(Page::landing_for(*role)),
            AccessDecision::Denied(_) => Some(Page::Login),
        }
    }
}

/// Access guard for page entry
#[derive(Clone)]
pub struct AccessGuard {
    store: SessionStore,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl AccessGuard {
    /// Create a new access guard
    pub fn new(store: SessionStore, clock: Arc<dyn Clock>, policy: SessionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Check whether the current session may enter a page requiring one of
    /// `required_roles`. An empty slice accepts any authenticated role.
    ///
    /// Outside the grace window a role mismatch logs the user out: the page
    /// is locked rather than merely hidden. Inside it the session is kept
    /// and the user is sent to their own dashboard.
    pub async fn check(&self, required_roles: &[Role]) -> StorageResult<AccessDecision> {
        let mut session = self.store.read().await?;
        if !session.is_authenticated() {
            return Ok(AccessDecision::Denied(Denial::NoToken));
        }

        let now = self.clock.now_millis();

        let in_grace = match session.login_time {
            None => {
                // Sessions written before loginTime existed
                info!("Initializing missing login time");
                self.store.touch(now).await?;
                session.login_time = Some(now);
                true
            }
            Some(login_time) => {
                if self.policy.is_within_grace_period(Some(login_time), now) {
                    true
                } else if self.policy.is_valid(Some(login_time), now) {
                    false
                } else {
                    warn!("Session expired");
                    self.store.clear().await?;
                    return Ok(AccessDecision::Denied(Denial::Expired));
                }
            }
        };

        if !required_roles.is_empty() && !session.has_any_role(required_roles) {
            warn!(
                "Access denied for role {:?}, page requires {:?}",
                session.role, required_roles
            );
            if !in_grace {
                self.store.clear().await?;
            }
            return Ok(AccessDecision::Denied(Denial::WrongRole {
                actual: session.role,
                session_cleared: !in_grace,
            }));
        }

        Ok(AccessDecision::Allowed(session))
    }
}
