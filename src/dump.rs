//! Snapshot production — `pg_dump` behind the [`Dumper`] seam.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::process::Command;

use crate::config::BackupConfig;
use crate::error::{BackupError, Result};

/// Capability seam for producing one snapshot file.
///
/// The real implementation shells out to `pg_dump`; tests substitute a
/// double. `produce` is expected to take as long as the dump itself — callers
/// must not invoke it on the scheduler's bookkeeping path.
#[async_trait]
pub trait Dumper: Send + Sync {
    fn name(&self) -> &str;

    /// Write one snapshot to `dest`. A failed attempt may leave a partial
    /// file behind; the job runner removes it.
    async fn produce(&self, dest: &Path) -> Result<()>;
}

/// Snapshot destination for a capture instant, minute granularity.
///
/// `db_backup_<YYYYMMDD_HHMM>.dump` is relied on by operators for manual
/// inspection — the format must be preserved exactly.
pub fn snapshot_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(format!("db_backup_{}.dump", at.format("%Y%m%d_%H%M")))
}

/// Invokes `pg_dump` in custom-archive format against the configured target.
pub struct PgDump {
    host: String,
    user: String,
    password: String,
    database: String,
}

impl PgDump {
    pub fn new(config: &BackupConfig) -> Self {
        Self {
            host: config.postgres_host.clone(),
            user: config.postgres_user.clone(),
            password: config.postgres_password.clone(),
            database: config.postgres_db.clone(),
        }
    }
}

#[async_trait]
impl Dumper for PgDump {
    fn name(&self) -> &str {
        "pg_dump"
    }

    async fn produce(&self, dest: &Path) -> Result<()> {
        let output = Command::new("pg_dump")
            .arg("-h")
            .arg(&self.host)
            .arg("-U")
            .arg(&self.user)
            .arg("-d")
            .arg(&self.database)
            .arg("-F")
            .arg("c")
            .arg("-f")
            .arg(dest)
            // Password travels via the child environment, never argv.
            .env("PGPASSWORD", &self.password)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| BackupError::Dump(format!("failed to spawn pg_dump: {e}")))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let status = match output.status.code() {
            Some(code) => format!("code {code}"),
            None => "signal".to_string(),
        };
        Err(BackupError::Dump(format!(
            "pg_dump exited with {status}: {}",
            stderr.trim()
        )))
    }
}
