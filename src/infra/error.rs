use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages are sanitized and safe for logs. Debug output includes
/// the full #[source] chain, which may contain the connection string.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database connection failed. Check DATABASE_URL and ensure the database is running.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Database migration failed")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("Local key store could not be opened")]
    LocalStore(#[source] std::io::Error),

    #[error("Log file could not be created")]
    LogFile(#[source] std::io::Error),

    #[error("Configuration error: environment variable {var} not set")]
    ConfigMissing { var: &'static str },
}
