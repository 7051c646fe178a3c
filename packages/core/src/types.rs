// ABOUTME: Task, profile, and session type definitions
// ABOUTME: Row shapes shared by every store backend and the view model

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_time::optional_hhmm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub tag: String,
    pub date: NaiveDate,
    #[serde(default, with = "optional_hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Local date-time the task is due, if it has a time of day.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.time.map(|time| self.date.and_time(time))
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(tag) = &patch.tag {
            self.tag = tag.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = Some(time);
        }
        if let Some(starred) = patch.is_starred {
            self.is_starred = starred;
        }
        if let Some(completed) = patch.is_completed {
            self.is_completed = completed;
        }
    }
}

/// A task that has not been persisted yet: no id, owner, or timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub tag: String,
    pub date: NaiveDate,
    #[serde(default, with = "optional_hhmm")]
    pub time: Option<NaiveTime>,
    pub is_starred: bool,
    pub is_completed: bool,
}

/// Partial update; `None` fields are not sent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "optional_hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            is_completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn starred(starred: bool) -> Self {
        Self {
            is_starred: Some(starred),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.tag.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.is_starred.is_none()
            && self.is_completed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            id: user_id.into(),
            full_name: None,
            avatar_url: None,
            date_of_birth: None,
            about: None,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
        if let Some(date_of_birth) = update.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(about) = &update.about {
            self.about = Some(about.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session as issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    /// Sessions this close to expiry are already treated as expired
    const EXPIRY_SKEW_SECS: i64 = 30;

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now + Duration::seconds(Self::EXPIRY_SKEW_SECS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            title: "Buy milk".to_string(),
            tag: "Personal".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0),
            is_starred: false,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut task = sample_task();
        let before = task.clone();

        task.apply(&TaskPatch::completed(true));

        assert!(task.is_completed);
        assert_eq!(task.title, before.title);
        assert_eq!(task.tag, before.tag);
        assert_eq!(task.date, before.date);
        assert_eq!(task.time, before.time);
        assert_eq!(task.is_starred, before.is_starred);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let json = serde_json::to_value(TaskPatch::starred(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "is_starred": true }));
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::tag("Work").is_empty());
    }

    #[test]
    fn test_due_at_requires_time() {
        let mut task = sample_task();
        assert_eq!(
            task.due_at(),
            Some(task.date.and_hms_opt(9, 0, 0).unwrap())
        );
        task.time = None;
        assert_eq!(task.due_at(), None);
    }

    #[test]
    fn test_session_expiry() {
        let user = User {
            id: "u1".to_string(),
            email: Some("test@example.com".to_string()),
        };
        let expired = Session {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: Utc::now() - Duration::minutes(10),
            user: user.clone(),
        };
        assert!(expired.is_expired());
        assert!(!expired.is_valid());

        // Inside the skew buffer counts as expired
        let nearly = Session {
            expires_at: Utc::now() + Duration::seconds(5),
            ..expired.clone()
        };
        assert!(nearly.is_expired());

        let valid = Session {
            expires_at: Utc::now() + Duration::hours(1),
            ..expired
        };
        assert!(valid.is_valid());
        assert_eq!(valid.user_id(), "u1");
    }
}
