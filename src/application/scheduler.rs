//! Fixed-interval driver for the poll pipeline.
//!
//! ```text
//!   Idle --tick--> Polling --cycle done--> Idle
//!     \                                     /
//!      +---------- shutdown --> Stopped <--+
//! ```
//!
//! Cycles never overlap: the next tick is only awaited after the current
//! cycle returns, and missed ticks are delayed rather than bursted.
//!
//! Shutdown abandons an in-flight cycle. Records dispatched but not yet
//! marked are delivered again after the restart.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use super::pipeline::{CycleReport, Pipeline};

/// Upper bound on waiting for the poll task after shutdown is requested.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Polling,
    Stopped,
}

/// Snapshot published after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    pub cycles_completed: u64,
    pub cycles_aborted: u64,
    pub last_report: Option<CycleReport>,
}

impl Default for SchedulerStatus {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            cycles_completed: 0,
            cycles_aborted: 0,
            last_report: None,
        }
    }
}

/// Timing configuration for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period between cycle starts.
    pub interval: Duration,
    /// Seen-set retention window; `None` keeps marks forever.
    pub retention: Option<Duration>,
    /// Minimum time between retention passes.
    pub prune_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4),
            retention: Some(Duration::from_secs(168 * 3600)),
            prune_interval: Duration::from_secs(3600),
        }
    }
}

/// Handle for observing and stopping a running scheduler.
pub struct SchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    status_rx: watch::Receiver<SchedulerStatus>,
    task: JoinHandle<Pipeline>,
}

impl SchedulerHandle {
    /// Latest published status.
    #[must_use]
    pub fn status(&self) -> SchedulerStatus {
        self.status_rx.borrow().clone()
    }

    /// Receiver for status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SchedulerStatus> {
        self.status_rx.clone()
    }

    /// Request shutdown and wait for the loop to stop.
    ///
    /// A cycle in progress is abandoned at its next await point. Returns the
    /// pipeline so callers can inspect it, or `None` if the task died or had
    /// to be aborted.
    pub async fn shutdown(mut self) -> Option<Pipeline> {
        let _ = self.shutdown_tx.send(()).await;
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut self.task).await {
            Ok(Ok(pipeline)) => Some(pipeline),
            Ok(Err(err)) => {
                error!(error = %err, "Poll scheduler task failed");
                None
            }
            Err(_) => {
                warn!(
                    grace_ms = SHUTDOWN_GRACE.as_millis() as u64,
                    "Poll scheduler did not stop in time; aborting"
                );
                self.task.abort();
                None
            }
        }
    }
}

/// Publishes `Stopped` when the poll task ends, including by panic or abort.
struct StatusPublisher(watch::Sender<SchedulerStatus>);

impl StatusPublisher {
    fn update(&self, modify: impl FnOnce(&mut SchedulerStatus)) {
        self.0.send_modify(modify);
    }
}

impl Drop for StatusPublisher {
    fn drop(&mut self) {
        self.0
            .send_modify(|status| status.state = SchedulerState::Stopped);
    }
}

/// Drives [`Pipeline::run_cycle`] forever, one cycle at a time.
pub struct PollScheduler {
    pipeline: Pipeline,
    config: SchedulerConfig,
}

impl PollScheduler {
    #[must_use]
    pub fn new(pipeline: Pipeline, config: SchedulerConfig) -> Self {
        Self { pipeline, config }
    }

    /// Spawn the poll loop on its own task.
    ///
    /// The first tick fires immediately, so the cold-start cycle runs right
    /// away.
    #[must_use]
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let (status_tx, status_rx) = watch::channel(SchedulerStatus::default());

        let task = tokio::spawn(self.run(shutdown_rx, StatusPublisher(status_tx)));

        SchedulerHandle {
            shutdown_tx,
            status_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut shutdown_rx: mpsc::Receiver<()>,
        publisher: StatusPublisher,
    ) -> Pipeline {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_prune: Option<Instant> = None;

        info!(
            feeds = self.pipeline.feeds().len(),
            interval_ms = self.config.interval.as_millis() as u64,
            store = self.pipeline.dedup().backend(),
            "Poll scheduler started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {}
            }

            publisher.update(|status| status.state = SchedulerState::Polling);

            if let Some(retention) = self.config.retention {
                let due = last_prune.map_or(true, |at| at.elapsed() >= self.config.prune_interval);
                if due {
                    match self.pipeline.prune(retention).await {
                        Ok(removed) => {
                            if removed > 0 {
                                info!(removed, "Pruned expired seen-set entries");
                            }
                            last_prune = Some(Instant::now());
                        }
                        Err(err) => warn!(error = %err, "Seen-set pruning failed"),
                    }
                }
            }

            let outcome = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    warn!("Shutdown requested mid-cycle; abandoning in-flight requests");
                    break;
                }
                outcome = self.pipeline.run_cycle() => outcome,
            };

            match outcome {
                Ok(report) => {
                    if report.records_announced > 0 || report.feeds_failed > 0 {
                        info!(
                            announced = report.records_announced,
                            reconciled = report.records_reconciled,
                            feeds_failed = report.feeds_failed,
                            delivery_failures = report.delivery_failures,
                            "Cycle complete"
                        );
                    }
                    publisher.update(|status| {
                        status.state = SchedulerState::Idle;
                        status.cycles_completed += 1;
                        status.last_report = Some(report);
                    });
                }
                Err(err) => {
                    error!(error = %err, "Cycle aborted, nothing further marked; retrying next tick");
                    publisher.update(|status| {
                        status.state = SchedulerState::Idle;
                        status.cycles_aborted += 1;
                    });
                }
            }
        }

        drop(publisher);
        info!("Poll scheduler stopped");
        self.pipeline
    }
}
