use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Store returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Not authorized to access this record")]
    Unauthorized,
    #[error("Record not found")]
    NotFound,
    #[error("Invalid data from store: {0}")]
    InvalidData(String),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidData(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
