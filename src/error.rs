use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to connect to MongoDB after {attempts} attempts: {source}")]
    Connection {
        attempts: u32,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
