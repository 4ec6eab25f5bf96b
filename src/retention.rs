//! Retention sweep — deletes snapshot files past their age threshold.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use crate::error::Result;

const SECS_PER_DAY: u64 = 86_400;

/// Delete regular files in `dir` strictly older than `retention_days` whole
/// days, measured against mtime. Returns the number of deletions.
///
/// A file exactly at the threshold is retained. Per-file failures (stat,
/// delete) are logged and skipped so one bad entry cannot abort the pass;
/// only a failure to list the directory itself propagates. Subdirectories
/// are skipped, never recursed into.
pub fn sweep(dir: &Path, retention_days: u32) -> Result<usize> {
    sweep_at(dir, retention_days, SystemTime::now())
}

/// Age is measured against an explicit `now` so tests can pin the clock.
fn sweep_at(dir: &Path, retention_days: u32, now: SystemTime) -> Result<usize> {
    let mut deleted = 0;
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("unreadable directory entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), "stat failed: {e}");
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }
        let modified = match meta.modified() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), "no mtime available: {e}");
                continue;
            }
        };

        let age_days =
            now.duration_since(modified).unwrap_or(Duration::ZERO).as_secs() / SECS_PER_DAY;
        if age_days > u64::from(retention_days) {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(path = %path.display(), age_days, "deleted expired snapshot");
                    deleted += 1;
                }
                Err(e) => warn!(path = %path.display(), "delete failed: {e}"),
            }
        }
    }
    Ok(deleted)
}
