use anyhow::Result;
use hello_db::PgPool;
use tracing::info;

/// Serve the web application until shutdown, then release the pool.
pub async fn handle_run(pool: PgPool, interface: String, port: u16, migrate: bool) -> Result<()> {
    if migrate {
        let migration_pool = pool.clone();
        tokio::task::spawn_blocking(move || hello_db::run_migrations(&migration_pool)).await??;
    }

    hello_db::start_web_server(interface, port, pool.clone()).await?;

    let state = pool.state();
    info!(
        "Closing database pool ({} connections, {} idle)",
        state.connections, state.idle_connections
    );
    drop(pool);

    Ok(())
}
