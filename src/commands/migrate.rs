use anyhow::Result;
use hello_db::PgPool;
use tracing::info;

pub async fn handle_migrate(pool: PgPool) -> Result<()> {
    info!("Running database migrations...");

    let applied = tokio::task::spawn_blocking(move || hello_db::run_migrations(&pool)).await??;

    info!(
        "Database migrations completed successfully ({} applied)",
        applied.len()
    );
    Ok(())
}
