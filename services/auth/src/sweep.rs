//! Periodic background expiry sweep

use std::sync::Arc;
use std::time::Duration;

use common::error::StorageResult;
use tokio::sync::mpsc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::error::AuthResult;
use crate::policy::SessionPolicy;
use crate::session::SessionStore;

/// Result of one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// No token or no loginTime; nothing to check
    Idle,
    /// Session younger than the sweep grace window
    InGrace,
    /// Session still valid
    Active,
    /// Session had expired and was cleared
    Expired,
}

/// Events published by the running sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
}

/// Background observer that clears expired sessions
#[derive(Clone)]
pub struct SessionSweeper {
    store: SessionStore,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
    interval: Duration,
}

impl SessionSweeper {
    /// Create a new sweeper
    pub fn new(
        store: SessionStore,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            interval,
        }
    }

    /// Run a single check against the current session
    pub async fn sweep_once(&self) -> StorageResult<SweepOutcome> {
        let session = self.store.read().await?;
        let (Some(_), Some(login_time)) = (session.token.as_ref(), session.login_time) else {
            return Ok(SweepOutcome::Idle);
        };

        let now = self.clock.now_millis();
        if self.policy.is_within_grace_period(Some(login_time), now) {
            return Ok(SweepOutcome::InGrace);
        }
        if self.policy.is_valid(Some(login_time), now) {
            return Ok(SweepOutcome::Active);
        }

        warn!("Background sweep found an expired session");
        self.store.clear().await?;
        Ok(SweepOutcome::Expired)
    }

    /// Start sweeping on a scheduler, publishing expirations on `events`
    ///
    /// The returned scheduler keeps running until it is shut down or
    /// dropped together with the runtime.
    pub async fn start(
        self,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> AuthResult<JobScheduler> {
        let scheduler = JobScheduler::new().await?;
        let interval = self.interval;
        let sweeper = self;

        let job = Job::new_repeated_async(interval, move |_, _| {
            let sweeper = sweeper.clone();
            let events = events.clone();
            Box::pin(async move {
                match sweeper.sweep_once().await {
                    Ok(SweepOutcome::Expired) => {
                        if events.send(SessionEvent::Expired).is_err() {
                            warn!("Session expired but nobody is listening");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Failed to sweep session: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("Started session sweep every {:?}", interval);
        Ok(scheduler)
    }
}
