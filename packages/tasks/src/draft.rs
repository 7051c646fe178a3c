// ABOUTME: New-task form state and its conversion into a persistable task
// ABOUTME: Applies the default tag, date, and time plus the Important star rule

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use daybook_core::{NewTask, ValidationError};
use daybook_tags::SystemTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub selected_tag: String,
    /// Free-text tag typed by the user; wins over `selected_tag` when not blank
    pub new_tag: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            selected_tag: SystemTag::MyDay.as_str().to_string(),
            new_tag: None,
            date: None,
            time: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tag = tag.into();
        self
    }

    pub fn with_new_tag(mut self, tag: impl Into<String>) -> Self {
        self.new_tag = Some(tag.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The tag the task will be saved with
    pub fn resolved_tag(&self) -> String {
        match self.new_tag.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => self.selected_tag.trim().to_string(),
        }
    }

    /// Build the task to persist; `now` supplies the default date and time
    pub fn into_new_task(self, now: NaiveDateTime) -> Result<NewTask, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let tag = self.resolved_tag();
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }

        let time = self.time.unwrap_or_else(|| {
            NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time())
        });

        Ok(NewTask {
            is_starred: tag == SystemTag::Important.as_str(),
            is_completed: false,
            date: self.date.unwrap_or(now.date()),
            time: Some(time),
            title,
            tag,
        })
    }
}
