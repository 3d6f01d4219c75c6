//! Periodic reminder checks.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::error::{GiftError, GiftResult};
use crate::gift::Gift;
use crate::gift_list::SharedGiftList;
use crate::reminder::{due_for_notification, notification_message};
use crate::sink::{Severity, Sink};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Push a notification for every gift due on `today`. Returns how many fired.
pub fn check_reminders(gifts: &[Gift], today: NaiveDate, sink: &dyn Sink) -> usize {
    let due = due_for_notification(gifts, today);
    for gift in &due {
        if let Some(message) = notification_message(gift, today) {
            sink.reminder(gift, &message, Severity::Reminder);
        }
    }
    due.len()
}

#[derive(Debug, Clone, Copy)]
pub struct SchedulerOptions {
    pub period: Duration,
    /// Re-read the store before each pass, unless it is missing changes.
    pub reload: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        SchedulerOptions {
            period: DEFAULT_CHECK_INTERVAL,
            reload: false,
        }
    }
}

/// Runs `check_reminders` against the shared list once at start and then
/// every period until stopped.
///
/// Passes never overlap: a pass is awaited before the next tick is taken,
/// and ticks missed meanwhile are not made up. A pass that panics is logged
/// and the schedule carries on.
pub struct ReminderScheduler {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl ReminderScheduler {
    /// Must be called from within a tokio runtime. The period must be
    /// non-zero.
    pub fn start(
        list: SharedGiftList,
        sink: Arc<dyn Sink>,
        clock: Arc<dyn Clock>,
        options: SchedulerOptions,
    ) -> GiftResult<Self> {
        if options.period.is_zero() {
            return Err(GiftError::Config(
                "reminder check period must be positive".into(),
            ));
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(options.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }

                let pass = tokio::spawn(run_pass(
                    list.clone(),
                    sink.clone(),
                    clock.clone(),
                    options.reload,
                ));

                match pass.await {
                    Ok(fired) => debug!(fired, "reminder pass complete"),
                    Err(e) if e.is_panic() => error!("reminder pass panicked"),
                    Err(e) => warn!(error = %e, "reminder pass cancelled"),
                }
            }

            debug!("reminder scheduler stopped");
        });

        Ok(ReminderScheduler { shutdown_tx, join })
    }

    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            warn!(error = %e, "reminder scheduler ended abnormally");
        }
    }
}

async fn run_pass(
    list: SharedGiftList,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    reload: bool,
) -> usize {
    let gifts = if reload {
        let mut guard = list.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.reload().to_vec()
    } else {
        let guard = list.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.snapshot()
    };

    check_reminders(&gifts, clock.today(), sink.as_ref())
}
