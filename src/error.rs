use thiserror::Error;

/// Errors that can occur within the backup daemon.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dump utility could not be spawned or exited non-zero.
    #[error("Dump failed: {0}")]
    Dump(String),

    /// Underlying filesystem failure (storage directory listing, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BackupError>;
