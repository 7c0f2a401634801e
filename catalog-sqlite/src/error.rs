use catalog_core::models::{DecodeError, ProductId};

/// Errors raised by the SQLite catalog
#[derive(Debug, thiserror::Error)]
pub enum SqliteError {
    /// The database rejected a query or could not be reached
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    /// A schema migration failed to apply
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    /// A stored document could not be decoded into a product
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A product or field value could not be encoded as JSON
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
    /// No document is stored under this id
    #[error("product {0} not found")]
    NotFound(ProductId),
}
