//! In-process fallback for the external cron scheduler.
//!
//! Deployments normally drive the lifecycle through the HTTP cron endpoints
//! (`POST /generate-daily-events` and friends). When `SCHEDULER_ENABLED` is
//! set, this task drives the same job functions from inside the process
//! instead, for single-box installs without an external scheduler.
//!
//! The weekly reset is deliberately NOT driven here; resetting leaderboards
//! is a destructive step that stays behind the explicit endpoint.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use squadgame_notify::push::PushClient;
use tokio_util::sync::CancellationToken;

use crate::jobs::{scheduler, transition};

/// How often the scheduler pass runs. Scheduling is idempotent per squad and
/// day, so an hourly cadence also catches squads whose midnight passed while
/// the process was down.
const SCHEDULE_INTERVAL: Duration = Duration::from_secs(3600);

/// In-process driver for the event lifecycle jobs.
///
/// A single long-lived Tokio task: every tick it opens due events and settles
/// due closes; once an hour it runs the daily scheduler pass.
pub struct CronDriver {
    pool: PgPool,
    push: Arc<PushClient>,
    tick_interval: Duration,
}

impl CronDriver {
    pub fn new(pool: PgPool, push: Arc<PushClient>, tick_secs: u64) -> Self {
        Self {
            pool,
            push,
            tick_interval: Duration::from_secs(tick_secs),
        }
    }

    /// Run the driver loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        let mut schedule_ticker = tokio::time::interval(SCHEDULE_INTERVAL);
        tracing::info!(
            tick_secs = self.tick_interval.as_secs(),
            schedule_secs = SCHEDULE_INTERVAL.as_secs(),
            "Cron driver started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Cron driver shutting down");
                    break;
                }
                _ = schedule_ticker.tick() => {
                    self.run_scheduler().await;
                }
                _ = ticker.tick() => {
                    self.run_transitions().await;
                }
            }
        }
    }

    /// One scheduler pass: draw today's event for every squad missing one.
    async fn run_scheduler(&self) {
        match scheduler::generate_daily_events(&self.pool).await {
            Ok(report) if report.created.is_empty() => {
                tracing::debug!("Scheduler pass: nothing to create");
            }
            Ok(report) => {
                tracing::info!(
                    created = report.created.len(),
                    skipped = report.skipped,
                    failed = report.failed,
                    "Scheduler pass complete",
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Scheduler pass failed");
            }
        }
    }

    /// One transition pass: open due events, then settle due closes.
    async fn run_transitions(&self) {
        if let Err(e) = transition::open_due_events(&self.pool, &self.push).await {
            tracing::error!(error = %e, "Open pass failed");
        }
        if let Err(e) = transition::close_due_events(&self.pool, &self.push).await {
            tracing::error!(error = %e, "Close pass failed");
        }
    }
}
