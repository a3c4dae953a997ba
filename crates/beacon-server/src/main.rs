//! Beacon proximity service binary.
//!
//! Wires configuration, logging, the storage backend, and the HTTP API
//! together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `BEACON_CONFIG` or `beacon-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured store (in-memory grid or `PostgreSQL`)
//! 4. Build the proximity service and serve the REST API

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use beacon_api::state::AppState;
use beacon_api::{ServerConfig, start_server};
use beacon_core::{
    BeaconConfig, EventStore, LogFormat, MemoryStore, ProximityService, StorageBackend,
};
use beacon_db::{PgEventStore, PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "beacon-config.yaml";

/// Application entry point for the Beacon server.
///
/// # Errors
///
/// Returns an error if configuration, storage setup, or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report the source after init.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(source = %source, "beacon-server starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        backend = ?config.storage.backend,
        default_radius_meters = config.query.default_radius_meters,
        "Configuration loaded"
    );

    // 3 + 4. Open storage and serve.
    match config.storage.backend {
        StorageBackend::Memory => {
            let store = MemoryStore::new(config.index.cell_size_degrees).map_err(AppError::from)?;
            info!(
                cell_size_degrees = config.index.cell_size_degrees,
                "In-memory grid store ready"
            );
            serve(&config, store).await?;
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(&config).await?;
            let store = PgEventStore::new(&pool);
            let result = serve(&config, store).await;
            pool.close().await;
            result?;
        }
    }

    info!("beacon-server stopped");
    Ok(())
}

/// Build the service over `store` and run the HTTP server until shutdown.
async fn serve<S: EventStore + 'static>(config: &BeaconConfig, store: S) -> Result<(), AppError> {
    let service =
        ProximityService::new(store).with_default_radius(config.query.default_radius_meters);
    let state = Arc::new(AppState::new(service));
    start_server(&ServerConfig::from(&config.server), state).await?;
    Ok(())
}

/// Connect to `PostgreSQL` and bring the schema up to date.
async fn connect_postgres(config: &BeaconConfig) -> Result<PostgresPool, AppError> {
    // `validate` guarantees a URL when the backend is postgres.
    let url = config.storage.postgres_url.as_deref().unwrap_or_default();
    let pg_config = PostgresConfig::new(url).with_max_connections(config.storage.max_connections);

    info!(max_connections = pg_config.max_connections, "Connecting to PostgreSQL");
    let pool = PostgresPool::connect(&pg_config).await?;
    pool.run_migrations().await?;
    info!("PostgreSQL connected and migrated");
    Ok(pool)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
fn init_tracing(config: &BeaconConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Load configuration from `BEACON_CONFIG` or `beacon-config.yaml`.
///
/// A missing file yields the defaults (with environment overrides still
/// applied). Returns the config and a description of where it came from.
fn load_config() -> Result<(BeaconConfig, String), AppError> {
    let path = std::env::var_os("BEACON_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<(BeaconConfig, String), AppError> {
    if path.exists() {
        let config = BeaconConfig::from_file(path)?;
        Ok((config, path.display().to_string()))
    } else {
        let config = BeaconConfig::parse("{}")?;
        Ok((config, String::from("defaults")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, source) =
            load_config_from(Path::new("/nonexistent/beacon-config.yaml")).unwrap();
        assert_eq!(source, "defaults");
        assert_eq!(config.index, BeaconConfig::default().index);
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let dir = std::env::temp_dir().join(format!("beacon-server-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("beacon-config.yaml");
        std::fs::write(&path, "index: [not, a, map]").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_cell_size_is_geo_error() {
        let err = MemoryStore::new(-1.0).map_err(AppError::from).unwrap_err();
        assert!(matches!(err, AppError::Geo { .. }));
    }
}
