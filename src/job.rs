//! One backup run: snapshot → notify → retention sweep.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use tracing::{error, info, warn};

use crate::config::BackupConfig;
use crate::dump::{snapshot_path, Dumper};
use crate::notify::Notify;
use crate::retention;
use crate::types::JobOutcome;

/// Orchestrates one execution of the backup pipeline.
///
/// The three steps run strictly in order, and the retention sweep runs
/// unconditionally — a failed snapshot must not prevent cleanup. A held
/// run-in-progress flag rejects overlapping invocations.
pub struct BackupJob {
    config: BackupConfig,
    dumper: Box<dyn Dumper>,
    notifier: Box<dyn Notify>,
    running: AtomicBool,
}

impl BackupJob {
    pub fn new(config: BackupConfig, dumper: Box<dyn Dumper>, notifier: Box<dyn Notify>) -> Self {
        Self {
            config,
            dumper,
            notifier,
            running: AtomicBool::new(false),
        }
    }

    /// Execute one run. Never fails the process: every step's error is
    /// captured and logged here.
    pub async fn run(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("backup already in progress — run rejected");
            return;
        }

        let outcome = self.snapshot().await;
        if outcome.succeeded {
            info!(path = %outcome.detail, "backup complete");
        } else {
            error!(detail = %outcome.detail, "backup failed");
        }

        // Best-effort: job success is decided by the snapshot step alone.
        self.notifier.send(&outcome.notification_text()).await;

        // Runs even after a failed snapshot.
        match retention::sweep(&self.config.backup_dir, self.config.retention_days) {
            Ok(deleted) => info!(deleted, "retention sweep complete"),
            Err(e) => error!("retention sweep failed: {e}"),
        }

        self.running.store(false, Ordering::SeqCst);
    }

    async fn snapshot(&self) -> JobOutcome {
        let dest = snapshot_path(&self.config.backup_dir, Local::now());
        info!(path = %dest.display(), dumper = self.dumper.name(), "starting backup");

        match self.dumper.produce(&dest).await {
            Ok(()) => JobOutcome::success(&dest),
            Err(e) => {
                // A failed dump may leave a partial archive; remove it so the
                // retention directory only holds completed snapshots.
                if dest.exists() {
                    if let Err(rm) = std::fs::remove_file(&dest) {
                        warn!(path = %dest.display(), "could not remove partial snapshot: {rm}");
                    } else {
                        info!(path = %dest.display(), "removed partial snapshot");
                    }
                }
                JobOutcome::failure(e.to_string())
            }
        }
    }
}
