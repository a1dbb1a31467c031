use std::net::SocketAddr;
use clap::Parser;
use rocket::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use votes_api::{
    build_rocket,
    config::DbConfig,
    error::StartupError,
    postgres,
    schema::ensure_schema,
    AppState, PgVoteDb,
};

const KEEP_ALIVE_SECS: u32 = 60;

/// HTTP API that records one vote per voter and reports the tally.
#[derive(Parser, Debug)]
#[command(name = "votes-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = DbConfig::from_env()?;
    info!("🔌 Connecting to postgres at {}:{}/{}", config.host, config.port, config.database);

    let pool = postgres::connect(&config).await.map_err(StartupError::Connect)?;
    ensure_schema(&pool).await?;
    info!("📋 Votes table ready");

    let figment = Config::figment()
        .merge(("address", args.addr.ip()))
        .merge(("port", args.addr.port()))
        .merge(("keep_alive", KEEP_ALIVE_SECS));

    info!("🚀 Listening on {}", args.addr);
    let launched = build_rocket(figment, AppState::new(PgVoteDb::new(pool.clone())))
        .launch()
        .await;

    pool.close().await;
    info!("Connection pool closed");

    launched.map(|_| ()).map_err(|e| StartupError::Launch(Box::new(e)))
}

#[rocket::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(args).await {
        error!("run api server: {}", e);
        std::process::exit(1);
    }
}
