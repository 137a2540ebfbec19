use config::AppConfig;
use db::{DBService, DbErr, schema};
use server::{AppState, http};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();
    init_tracing(config.debug);

    tracing::debug!(?config, "Loaded configuration");

    let db = match connect(&config).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                host = %config.database.host,
                port = config.database.port,
                name = %config.database.name,
                "Database connection failed: {}",
                err
            );
            return Err(err.into());
        }
    };
    tracing::info!("Database connection established");

    schema::ensure_tasks_table(&db.pool).await?;

    let app_router = http::router(AppState::new(db.clone()));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Server running on http://{local_addr}");
    tracing::info!("Health check: http://{local_addr}/health");

    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool.close().await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the workspace crates log at `info`, or
/// `debug` with `DEBUG=true`.
fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter_string = format!(
        "warn,server={level},db={level},config={level},tower_http={level}",
        level = level
    );
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_string))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();
}

async fn connect(config: &AppConfig) -> Result<DBService, DbErr> {
    let db = DBService::new(&config.database).await?;
    db.ping().await?;
    Ok(db)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
