//! Server bootstrap: configuration, telemetry, store selection, serving.

use std::sync::Arc;

use tracing::info;

use crate::adapters::http::app_router;
use crate::adapters::store::{FileProfileStore, InMemoryProfileStore, PgProfileStore};
use crate::config::{AppConfig, ConfigError, StorageBackend, StorageConfig, ValidationError};
use crate::ports::{ProfileStore, StoreError};
use crate::telemetry::{self, TelemetryError};

/// Errors that stop the server from starting or running
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("Failed to open profile store: {0}")]
    Store(#[from] StoreError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::Config(ConfigError::ValidationFailed(err))
    }
}

/// Open the configured ProfileStore adapter.
pub async fn build_store(config: &StorageConfig) -> Result<Arc<dyn ProfileStore>, ServerError> {
    let store: Arc<dyn ProfileStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryProfileStore::new()),
        StorageBackend::File => Arc::new(FileProfileStore::new(&config.data_dir)),
        StorageBackend::Postgres => {
            let url = config
                .database_url()
                .ok_or(ValidationError::MissingRequired("STORAGE__DATABASE_URL"))?;
            Arc::new(PgProfileStore::connect(url, config.max_connections).await?)
        }
    };
    Ok(store)
}

/// Load configuration and serve the REST API until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init(&config.server)?;

    let store = build_store(&config.storage).await?;
    let app = app_router(store, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        %addr,
        "decision scale server ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("decision scale server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
