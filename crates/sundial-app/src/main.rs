use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::serve_static::StaticDir;
use salvo::{Listener, Router};
use sundial_app::app::api::healthcheck::healthcheck_handler;
use sundial_app::app::api::routes;
use sundial_app::config::ConfigHandler;
use sundial_app::db_handler::DbProviderHandler;
use sundial_core::config::load_config;
use sundial_db::db::connection::create_pool;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Sundial task scheduler");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let pool = create_pool(
        &config.database.file,
        u32::from(config.database.max_connections),
    )?;

    tracing::info!("Database connection pool created.");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let web_dir = config.server.web_dir.clone();
    let router = Router::new()
        .hoop(Logger::new())
        .hoop(DbProviderHandler { provider: pool })
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .push(routes())
        .push(Router::with_path("healthz").get(healthcheck_handler))
        .push(
            Router::with_path("{**path}")
                .get(StaticDir::new(web_dir).defaults("index.html")),
        );

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
