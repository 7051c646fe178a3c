use daybook_auth::AuthError;
use daybook_config::ConfigError;
use daybook_storage::StorageError;
use daybook_tasks::TaskError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Not signed in. Run 'daybook login' first (redirect: {location})")]
    LoginRequired { location: String },

    #[error("Already signed in")]
    AlreadySignedIn,
}

pub type CliResult<T> = Result<T, CliError>;
