use anyhow::Result;
use clap::{Parser, Subcommand};
use hello_db::log_format::CompactFormat;
use hello_db::{DatabaseConfig, PoolConfig};
use std::io::IsTerminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser)]
#[command(name = "hello-db")]
#[command(about = "Flight schedule web application backed by PostgreSQL")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    pool: PoolConfig,

    /// Interface the web server binds to
    #[arg(long, env = "HTTP_INTERFACE", default_value = "127.0.0.1", global = true)]
    interface: String,

    /// Port the web server listens on
    #[arg(long, env = "HTTP_PORT", default_value_t = 8080, global = true)]
    port: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Run {
        /// Apply pending migrations before serving
        #[arg(long, default_value_t = false)]
        migrate: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Insert demo planets and flights
    Seed,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(CompactFormat::new(ansi)),
        )
        .init();
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        database,
        pool: pool_config,
        interface,
        port,
        command,
    } = cli;

    // Pool creation blocks while the first connections are opened
    let pool = tokio::task::spawn_blocking(move || {
        hello_db::create_pool(&database, &pool_config)
    })
    .await??;

    match command.unwrap_or(Commands::Run { migrate: false }) {
        Commands::Run { migrate } => commands::handle_run(pool, interface, port, migrate).await?,
        Commands::Migrate => commands::handle_migrate(pool).await?,
        Commands::Seed => commands::handle_seed(pool).await?,
    }

    info!("Shutdown complete");
    Ok(())
}
