use std::env;
use std::path::PathBuf;

/// File name of the local SQLite database inside the data directory
pub const DEFAULT_DB_FILE: &str = "daybook.db";

/// Get the path to the Daybook data directory (~/.daybook)
pub fn daybook_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".daybook")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".daybook")
    }
}

/// Get the path to the persisted session file (~/.daybook/session.toml)
pub fn session_file() -> PathBuf {
    daybook_dir().join("session.toml")
}
