//! Error types for CoinPulse

use thiserror::Error;

/// Main error type for CoinPulse core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Login was attempted with an empty credential
    #[error("Credential must not be empty")]
    EmptyToken,

    /// HTTP transport or decoding failure (reqwest)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Market data provider answered with a non-success status
    #[error("Market API error: {0}")]
    MarketApi(String),

    /// Chat backend failure, carrying the detail string shown to the user
    #[error("{0}")]
    Chat(String),

    /// Offline asset could not be fetched or is missing from the cache
    #[error("Asset error: {0}")]
    Asset(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Error during storage operations (redb)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result type alias using CoreError
pub type CoreResult<T> = Result<T, CoreError>;
