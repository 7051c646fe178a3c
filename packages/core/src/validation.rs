// ABOUTME: Input validation for tasks and user-supplied dates and times
// ABOUTME: Rejects blank titles and tags before anything reaches a store

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::serde_time::parse_clock_time;
use crate::types::{NewTask, TaskPatch};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Task tag cannot be empty")]
    EmptyTag,

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
}

pub fn validate_new_task(task: &NewTask) -> Result<(), ValidationError> {
    if task.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if task.tag.trim().is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    Ok(())
}

pub fn validate_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
    if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
        return Err(ValidationError::EmptyTitle);
    }
    if matches!(&patch.tag, Some(tag) if tag.trim().is_empty()) {
        return Err(ValidationError::EmptyTag);
    }
    Ok(())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    parse_clock_time(raw.trim()).map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}
