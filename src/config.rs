use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{BackupError, Result};

pub const DEFAULT_RETENTION_DAYS: u32 = 14;
pub const DEFAULT_BACKUP_HOUR: u8 = 2; // daily trigger at 02:00 local time

/// Top-level config (pgsnapd.toml + PGSNAPD_* env overrides).
///
/// Constructed once at startup and passed by reference into every component;
/// nothing reads the environment after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// PostgreSQL host passed to pg_dump via `-h`.
    #[serde(default = "default_host")]
    pub postgres_host: String,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_db: String,

    /// Directory snapshots are written to and swept from.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
    /// Files strictly older than this many whole days are deleted.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Daily fire time, local wall clock.
    #[serde(default = "default_backup_hour")]
    pub backup_hour: u8,
    #[serde(default)]
    pub backup_minute: u8,

    /// Telegram bot credentials. Both must be present and non-empty for
    /// notifications; otherwise the daemon runs with notification disabled.
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub admin_chat_id: Option<String>,
}

fn default_host() -> String {
    "postgres".to_string()
}
fn default_backup_dir() -> PathBuf {
    PathBuf::from("/backups")
}
fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}
fn default_backup_hour() -> u8 {
    DEFAULT_BACKUP_HOUR
}

impl BackupConfig {
    /// Load config from a TOML file with PGSNAPD_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ./pgsnapd.toml
    ///
    /// Every non-credential field has a default, so env-only deployments
    /// (PGSNAPD_POSTGRES_USER=... etc., no TOML file) work as-is.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or("pgsnapd.toml");

        let config: BackupConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("PGSNAPD_"))
            .extract()
            .map_err(|e| BackupError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Telegram credentials when notification is enabled: both values set
    /// and non-empty. Absence is a defined disabled state, not an error.
    pub fn telegram(&self) -> Option<(&str, &str)> {
        let token = self.bot_token.as_deref().filter(|t| !t.is_empty())?;
        let chat_id = self.admin_chat_id.as_deref().filter(|c| !c.is_empty())?;
        Some((token, chat_id))
    }

    fn validate(&self) -> Result<()> {
        if self.postgres_user.is_empty() || self.postgres_db.is_empty() {
            return Err(BackupError::Config(
                "postgres_user and postgres_db must be set".to_string(),
            ));
        }
        if self.backup_hour > 23 || self.backup_minute > 59 {
            return Err(BackupError::Config(format!(
                "invalid backup time {:02}:{:02}",
                self.backup_hour, self.backup_minute
            )));
        }
        Ok(())
    }
}
