//! `pgsnapd` — scheduled PostgreSQL backup daemon.
//!
//! # Overview
//!
//! Once a day at a configured local time, the [`engine::SchedulerEngine`]
//! fires a [`job::BackupJob`]: a `pg_dump` snapshot is written to the storage
//! directory, the outcome is reported to an operator Telegram channel, and a
//! retention sweep deletes snapshots past their age threshold. The sweep runs
//! after every attempt, including failed ones.
//!
//! # Run pipeline
//!
//! | Step     | Behaviour                                                  |
//! |----------|------------------------------------------------------------|
//! | snapshot | `pg_dump` to `db_backup_<YYYYMMDD_HHMM>.dump`              |
//! | notify   | best-effort Telegram message; no-op without credentials    |
//! | sweep    | delete files strictly older than `retention_days`; always runs |
//!
//! Nothing in the pipeline is fatal to the process: step failures are logged
//! and the scheduler keeps waiting for the next trigger.

pub mod config;
pub mod dump;
pub mod engine;
pub mod error;
pub mod job;
pub mod notify;
pub mod retention;
pub mod schedule;
pub mod types;

pub use config::BackupConfig;
pub use engine::SchedulerEngine;
pub use error::{BackupError, Result};
pub use job::BackupJob;
pub use types::JobOutcome;
