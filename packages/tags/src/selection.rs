// ABOUTME: Tag selection predicate and aggregation over a task list
// ABOUTME: Counts every system tag plus any custom tag seen on a task

use chrono::NaiveDate;
use daybook_core::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::types::SystemTag;

/// The tag a list view is filtered by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagSelection {
    System(SystemTag),
    Custom(String),
}

impl TagSelection {
    /// System tag names map to their variant; anything else is custom
    pub fn from_name(name: &str) -> Self {
        match SystemTag::from_name(name) {
            Some(tag) => TagSelection::System(tag),
            None => TagSelection::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TagSelection::System(tag) => tag.as_str(),
            TagSelection::Custom(name) => name,
        }
    }

    /// Whether `task` belongs under this tag; `My Day` compares against `today`
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TagSelection::System(SystemTag::All) => true,
            TagSelection::System(SystemTag::Important) => task.is_starred,
            TagSelection::System(SystemTag::Completed) => task.is_completed,
            TagSelection::System(SystemTag::MyDay) => task.date == today,
            TagSelection::System(SystemTag::Personal) => task.tag == SystemTag::Personal.as_str(),
            TagSelection::Custom(name) => task.tag == *name,
        }
    }
}

impl Default for TagSelection {
    fn default() -> Self {
        TagSelection::System(SystemTag::MyDay)
    }
}

impl fmt::Display for TagSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SystemTag> for TagSelection {
    fn from(tag: SystemTag) -> Self {
        TagSelection::System(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: TagSelection,
    pub count: usize,
}

/// Distinct non-system tag values in first-seen order
pub fn custom_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .map(|task| task.tag.as_str())
        .filter(|tag| !SystemTag::is_system(tag))
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

/// Count per system tag (in display order) followed by each custom tag
pub fn tag_counts(tasks: &[Task], today: NaiveDate) -> Vec<TagCount> {
    SystemTag::ALL
        .into_iter()
        .map(TagSelection::System)
        .chain(custom_tags(tasks).into_iter().map(TagSelection::Custom))
        .map(|tag| {
            let count = tasks.iter().filter(|task| tag.matches(task, today)).count();
            TagCount { tag, count }
        })
        .collect()
}
