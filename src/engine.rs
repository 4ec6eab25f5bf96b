//! Scheduler engine — owns the daily trigger and drives the backup job.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;
use tracing::info;

use crate::job::BackupJob;
use crate::schedule::next_daily_run;

/// Recurring daily trigger around a single [`BackupJob`].
///
/// The loop sleeps until the next fire instant, spawns the job as an
/// independent task so a slow dump cannot stall trigger bookkeeping, and
/// recomputes. There is no double-firing: the next instant is always
/// computed strictly after the current one, and the job's own guard rejects
/// overlap in the pathological case of a run outliving a full day.
pub struct SchedulerEngine {
    job: Arc<BackupJob>,
    hour: u8,
    minute: u8,
}

impl SchedulerEngine {
    pub fn new(job: Arc<BackupJob>, hour: u8, minute: u8) -> Self {
        Self { job, hour, minute }
    }

    /// Main loop. Runs until `shutdown` broadcasts `true`; an in-flight job
    /// task is left to finish on its own.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            hour = self.hour,
            minute = self.minute,
            "scheduler engine started"
        );

        loop {
            let now = Local::now();
            let next = next_daily_run(self.hour, self.minute, now);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next = %next, "waiting for next trigger");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    let job = Arc::clone(&self.job);
                    tokio::spawn(async move { job.run().await });
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }
}
