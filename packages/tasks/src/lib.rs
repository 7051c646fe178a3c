// ABOUTME: Task workflows for Daybook: store adapter, list view model, and reminders
// ABOUTME: Every operation takes an explicit auth context and reports back as a notice

pub mod adapter;
pub mod draft;
pub mod error;
pub mod notice;
pub mod profile;
pub mod reminders;
pub mod view_model;

pub use adapter::TaskAdapter;
pub use draft::TaskDraft;
pub use error::{TaskError, TaskResult};
pub use notice::{Notice, NoticeLevel};
pub use profile::ProfileService;
pub use reminders::{upcoming, Reminder, ReminderHandle, ReminderInbox, ReminderTicker};
pub use view_model::{TaskSnapshot, TaskViewModel};
