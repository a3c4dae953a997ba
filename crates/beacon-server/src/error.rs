//! Error types for the Beacon server binary.
//!
//! [`AppError`] wraps every failure mode during startup and serving so
//! `main` can propagate with `?`.

/// Top-level error for the Beacon server binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: beacon_core::ConfigError,
    },

    /// Connecting to or migrating `PostgreSQL` failed.
    #[error("database error: {source}")]
    Db {
        /// The underlying database error.
        #[from]
        source: beacon_db::DbError,
    },

    /// The in-memory index rejected its configuration.
    #[error("index error: {source}")]
    Geo {
        /// The underlying geometry error.
        #[from]
        source: beacon_geo::GeoError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: beacon_api::ServerError,
    },
}
