use std::sync::Arc;

use tracing::info;

use pgsnapd::{BackupConfig, BackupJob, SchedulerEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pgsnapd=info".into()),
        )
        .init();

    // load config: explicit PGSNAPD_CONFIG path > ./pgsnapd.toml,
    // with PGSNAPD_* env vars overriding either
    let config_path = std::env::var("PGSNAPD_CONFIG").ok();
    let config = BackupConfig::load(config_path.as_deref())?;

    std::fs::create_dir_all(&config.backup_dir)?;
    info!(
        dir = %config.backup_dir.display(),
        retention_days = config.retention_days,
        "storage directory ready"
    );

    let dumper = Box::new(pgsnapd::dump::PgDump::new(&config));
    let notifier = pgsnapd::notify::from_config(&config);
    info!(sink = notifier.name(), "notification sink selected");

    let (hour, minute) = (config.backup_hour, config.backup_minute);
    let job = Arc::new(BackupJob::new(config, dumper, notifier));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let engine = SchedulerEngine::new(job, hour, minute);
    let engine_task = tokio::spawn(async move { engine.run(shutdown_rx).await });

    info!("backup service started — waiting for schedule");

    // Idle until the process is told to stop.
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
    let _ = engine_task.await;

    Ok(())
}
