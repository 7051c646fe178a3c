// ABOUTME: Tag model for organizing tasks
// ABOUTME: Fixed system tags, the active tag selection, and derived counts

pub mod selection;
pub mod types;

// Re-export main types
pub use selection::{custom_tags, tag_counts, TagCount, TagSelection};
pub use types::SystemTag;
