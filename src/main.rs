use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod shared;
mod domain;
mod ports;
mod infrastructure;
mod services;
mod presentation;

use shared::config::Config;
use shared::error::AppError;
use shared::result::Result;
use infrastructure::favorites::InMemoryFavoritesStore;
use infrastructure::github::GithubSearchClient;
use presentation::routes::AppContext;


#[derive(Parser, Debug)]
#[clap(name = "repofinder")]
#[clap(version = "0.1.0")]
#[clap(about = "GitHub repository search proxy with per-user favorites")]
pub struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[clap(short, long, value_parser, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address
    #[clap(short, long)]
    bind_address: Option<SocketAddr>,

    /// JSON file the favorites are loaded from and flushed to
    #[clap(short = 'f', long, value_parser, value_name = "PATH")]
    favorites_path: Option<PathBuf>,

    /// Keep favorites in memory only
    #[clap(long)]
    no_persist: bool,
}


#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 加载配置
    let config = Config::from_args_and_file(
        args.config.clone(),
        args.bind_address,
        args.favorites_path.clone(),
        args.no_persist,
    )?;

    info!("Starting repofinder server...");
    info!("Configuration loaded: {:?}", config);

    let token = config.github.token();
    if token.is_none() {
        warn!(
            "{} is not set, GitHub requests will be unauthenticated",
            config.github.token_env
        );
    }
    let search_client = Arc::new(GithubSearchClient::new(&config.github, token)?);
    info!("GitHub search endpoint: {}", search_client.search_url());

    // 启动时加载收藏
    let favorites = Arc::new(match config.favorites.storage_path() {
        Some(path) => InMemoryFavoritesStore::with_storage(path),
        None => InMemoryFavoritesStore::new(),
    });
    favorites.load().await;

    let app_context = Arc::new(AppContext {
        search_client,
        favorites: favorites.clone(),
    });

    let cors = presentation::routes::cors_layer(&config.server.cors_origins)?;

    let app = presentation::routes::create_app_router(app_context).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;

    info!("Server listening on {}", config.server.bind_address);
    info!("  GET    /repositories");
    info!("  GET    /users/{{userId}}/favorites");
    info!("  POST   /users/{{userId}}/favorites");

    let server_result = axum::serve(listener, app)
        .with_graceful_shutdown(services::lifecycle::shutdown_signal())
        .await
        .map_err(AppError::Io);

    // 无论服务是否正常退出，都写回收藏
    services::lifecycle::persist_favorites(&favorites).await;

    server_result
}
