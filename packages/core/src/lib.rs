// ABOUTME: Core types, traits, and utilities for Daybook
// ABOUTME: Foundational package providing shared functionality across all Daybook packages

pub mod clock;
pub mod constants;
pub mod serde_time;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{NewTask, Profile, ProfileUpdate, Session, Task, TaskPatch, User};

// Re-export clock
pub use clock::{Clock, FixedClock, SystemClock};

// Re-export constants
pub use constants::{daybook_dir, session_file, DEFAULT_DB_FILE};

// Re-export utilities
pub use utils::{file_extension, random_file_segment};

// Re-export validation
pub use validation::{
    parse_date, parse_time, validate_new_task, validate_patch, ValidationError,
};
