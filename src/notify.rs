//! Outcome notification — best-effort Telegram delivery.
//!
//! Delivery never influences job success: the [`Notify`] contract is
//! infallible by construction, and failures are logged and dropped.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::BackupConfig;

/// Request budget per delivery attempt — a hung Telegram API must not stall
/// the run pipeline indefinitely.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Best-effort message sink.
#[async_trait]
pub trait Notify: Send + Sync {
    fn name(&self) -> &str;

    /// One delivery attempt. Must never return an error to the caller.
    async fn send(&self, text: &str);
}

/// Selected when Telegram credentials are absent. Notification disabled is a
/// defined state, not an error.
pub struct NoopNotifier;

#[async_trait]
impl Notify for NoopNotifier {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, _text: &str) {
        debug!("notification skipped (no Telegram credentials)");
    }
}

/// One `sendMessage` POST per outcome, form-encoded, plain text.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_base_url(token, chat_id, "https://api.telegram.org")
    }

    /// Override the API host — tests point this at an unroutable address.
    pub fn with_base_url(
        token: impl Into<String>,
        chat_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let result = self
            .client
            .post(&url)
            .timeout(SEND_TIMEOUT)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!(status = %resp.status(), "Telegram rejected notification"),
            Err(e) => warn!("Telegram delivery failed: {e}"),
        }
    }
}

/// Pick the sink for this config: Telegram when both credentials are present
/// and non-empty, otherwise the no-op.
pub fn from_config(config: &BackupConfig) -> Box<dyn Notify> {
    match config.telegram() {
        Some((token, chat_id)) => Box::new(TelegramNotifier::new(token, chat_id)),
        None => Box::new(NoopNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_without_telegram() -> BackupConfig {
        BackupConfig {
            postgres_host: "postgres".to_string(),
            postgres_user: "admin".to_string(),
            postgres_password: "secret".to_string(),
            postgres_db: "app".to_string(),
            backup_dir: PathBuf::from("/backups"),
            retention_days: 14,
            backup_hour: 2,
            backup_minute: 0,
            bot_token: None,
            admin_chat_id: None,
        }
    }

    #[test]
    fn missing_credentials_select_noop() {
        assert_eq!(from_config(&config_without_telegram()).name(), "noop");
    }

    #[test]
    fn empty_token_selects_noop() {
        let mut config = config_without_telegram();
        config.bot_token = Some(String::new());
        config.admin_chat_id = Some("42".to_string());
        assert_eq!(from_config(&config).name(), "noop");
    }

    #[test]
    fn full_credentials_select_telegram() {
        let mut config = config_without_telegram();
        config.bot_token = Some("123:abc".to_string());
        config.admin_chat_id = Some("42".to_string());
        assert_eq!(from_config(&config).name(), "telegram");
    }

    #[tokio::test]
    async fn unreachable_transport_never_raises() {
        // Nothing listens on port 9 — the connection is refused immediately.
        let notifier = TelegramNotifier::with_base_url("123:abc", "42", "http://127.0.0.1:9");
        notifier.send("✅ Backup successful: /backups/x.dump").await;
    }
}
