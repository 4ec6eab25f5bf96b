use std::path::Path;

/// Result of one snapshot attempt. Consumed by the notifier and discarded —
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub succeeded: bool,
    /// Destination path on success; captured error text on failure.
    pub detail: String,
}

impl JobOutcome {
    pub fn success(dest: &Path) -> Self {
        Self {
            succeeded: true,
            detail: dest.display().to_string(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            detail: detail.into(),
        }
    }

    /// Operator-facing message. The glyph prefix is part of the external
    /// contract — operators filter on it.
    pub fn notification_text(&self) -> String {
        if self.succeeded {
            format!("✅ Backup successful: {}", self.detail)
        } else {
            format!("❌ Backup failed: {}", self.detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn success_text_embeds_destination() {
        let outcome = JobOutcome::success(&PathBuf::from("/backups/db_backup_20240301_0200.dump"));
        let text = outcome.notification_text();
        assert!(text.starts_with("✅"));
        assert!(text.contains("/backups/db_backup_20240301_0200.dump"));
    }

    #[test]
    fn failure_text_embeds_error_detail() {
        let outcome = JobOutcome::failure("pg_dump exited with code 1: connection refused");
        let text = outcome.notification_text();
        assert!(text.starts_with("❌"));
        assert!(text.contains("connection refused"));
    }
}
