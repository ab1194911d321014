use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerError {
    #[error("Invalid save id: {0}")]
    InvalidId(String),

    #[error("Save not found: {0}")]
    NotFound(String),

    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Save store error: {0}")]
    StoreError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CareerError {
    /// HTTP status a REST surface would answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CareerError::InvalidId(_) => 400,
            CareerError::NotFound(_) => 404,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CareerError>;
