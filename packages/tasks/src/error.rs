use daybook_core::ValidationError;
use daybook_storage::StorageError;
use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Authentication required: please run 'daybook login'")]
    AuthenticationRequired,

    #[error("Store operation failed: {0}")]
    StoreOperationFailed(#[from] StorageError),

    #[error("{0}")]
    ValidationFailed(#[from] ValidationError),
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::StoreOperationFailed(StorageError::NotFound))
    }
}
