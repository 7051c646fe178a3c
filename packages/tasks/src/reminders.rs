// ABOUTME: Upcoming-task reminders and the cancellable ticker that scans for them
// ABOUTME: Reads list snapshots from a watch channel and never mutates tasks

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use daybook_config::ReminderConfig;
use daybook_core::{Clock, Task};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::view_model::TaskSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    pub due_date: NaiveDate,
    pub due_time: NaiveTime,
    pub is_read: bool,
}

impl Reminder {
    fn for_task(task: &Task, due_date: NaiveDate, due_time: NaiveTime) -> Self {
        Self {
            id: nanoid::nanoid!(),
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            due_date,
            due_time,
            is_read: false,
        }
    }

    pub fn due_at(&self) -> NaiveDateTime {
        self.due_date.and_time(self.due_time)
    }
}

/// Open tasks due within `(now, now + lead]`
pub fn upcoming<'a>(tasks: &'a [Task], now: NaiveDateTime, lead: Duration) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| !task.is_completed)
        .filter(|task| {
            task.due_at().is_some_and(|due| {
                let remaining = due - now;
                remaining > Duration::zero() && remaining <= lead
            })
        })
        .collect()
}

/// Reminders surfaced so far, at most one per task
#[derive(Debug, Default, Clone)]
pub struct ReminderInbox {
    reminders: Vec<Reminder>,
}

impl ReminderInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn unread_count(&self) -> usize {
        self.reminders.iter().filter(|r| !r.is_read).count()
    }

    /// Returns false when no reminder has that id
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.reminders.iter_mut().find(|r| r.id == id) {
            Some(reminder) => {
                reminder.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for reminder in &mut self.reminders {
            reminder.is_read = true;
        }
    }

    /// Fold one scan into the inbox and return reminders that are new or rescheduled.
    ///
    /// An entry for a task seen again is replaced; it keeps its id and read
    /// state when the due date and time have not moved.
    pub fn merge(&mut self, found: &[&Task]) -> Vec<Reminder> {
        let mut fresh = Vec::new();

        for task in found {
            let Some(due_time) = task.time else {
                continue;
            };

            let previous = self
                .reminders
                .iter()
                .position(|r| r.task_id == task.id)
                .map(|index| self.reminders.remove(index));

            let mut reminder = Reminder::for_task(task, task.date, due_time);
            match previous {
                Some(old) if old.due_date == reminder.due_date && old.due_time == due_time => {
                    reminder.id = old.id;
                    reminder.is_read = old.is_read;
                }
                _ => fresh.push(reminder.clone()),
            }
            self.reminders.push(reminder);
        }

        fresh
    }

    /// Drop reminders whose task is no longer in `tasks`
    pub fn prune(&mut self, tasks: &[Task]) {
        self.reminders
            .retain(|r| tasks.iter().any(|task| task.id == r.task_id));
    }

    /// Scan `tasks` at `now`, forget reminders for deleted tasks and merge the result
    pub fn scan(&mut self, tasks: &[Task], now: NaiveDateTime, lead: Duration) -> Vec<Reminder> {
        self.prune(tasks);
        let found = upcoming(tasks, now, lead);
        self.merge(&found)
    }
}

pub struct ReminderTicker {
    interval: std::time::Duration,
    lead: Duration,
    clock: Arc<dyn Clock>,
    inbox: Arc<Mutex<ReminderInbox>>,
}

impl ReminderTicker {
    pub fn new(config: &ReminderConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            interval: config.interval(),
            lead: config.lead(),
            clock,
            inbox: Arc::new(Mutex::new(ReminderInbox::new())),
        }
    }

    pub fn inbox(&self) -> Arc<Mutex<ReminderInbox>> {
        Arc::clone(&self.inbox)
    }

    /// Start scanning: once immediately, then every interval until cancelled.
    ///
    /// Fresh reminders are also sent on the returned channel.
    pub fn spawn(
        self,
        tasks: watch::Receiver<TaskSnapshot>,
    ) -> (ReminderHandle, mpsc::UnboundedReceiver<Reminder>) {
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let inbox = Arc::clone(&self.inbox);

        let join = tokio::spawn(self.run(tasks, tx, token.clone()));

        (
            ReminderHandle {
                token,
                join: Some(join),
                inbox,
            },
            rx,
        )
    }

    async fn run(
        self,
        tasks: watch::Receiver<TaskSnapshot>,
        tx: mpsc::UnboundedSender<Reminder>,
        token: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!("Reminder ticker started (every {:?})", self.interval);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let snapshot = tasks.borrow().clone();
                    let fresh = self
                        .inbox
                        .lock()
                        .await
                        .scan(&snapshot, self.clock.now(), self.lead);

                    debug!("Reminder scan found {} new reminders", fresh.len());
                    for reminder in fresh {
                        if tx.send(reminder).is_err() {
                            debug!("Reminder receiver dropped");
                        }
                    }
                }
            }
        }

        info!("Reminder ticker stopped");
    }
}

/// Owns a running ticker; dropping it cancels the ticker
pub struct ReminderHandle {
    token: CancellationToken,
    join: Option<JoinHandle<()>>,
    inbox: Arc<Mutex<ReminderInbox>>,
}

impl ReminderHandle {
    pub fn inbox(&self) -> Arc<Mutex<ReminderInbox>> {
        Arc::clone(&self.inbox)
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|join| !join.is_finished())
    }

    /// Cancel the ticker and wait for it to exit
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for ReminderHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn task_due_in(id: &str, minutes: i64) -> Task {
        let due = now() + Duration::minutes(minutes);
        Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("Task {}", id),
            tag: "Personal".to_string(),
            date: due.date(),
            time: Some(due.time()),
            is_starred: false,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_window_excludes_now_and_includes_lead() {
        let tasks = vec![
            task_due_in("now", 0),
            task_due_in("soon", 1),
            task_due_in("edge", 30),
            task_due_in("late", 31),
            task_due_in("past", -5),
        ];

        let found = upcoming(&tasks, now(), Duration::minutes(30));
        assert_eq!(ids(&found), vec!["soon", "edge"]);
    }

    #[test]
    fn test_completed_and_untimed_tasks_are_skipped() {
        let mut done = task_due_in("done", 10);
        done.is_completed = true;
        let mut untimed = task_due_in("untimed", 10);
        untimed.time = None;

        let tasks = vec![done, untimed];
        assert!(upcoming(&tasks, now(), Duration::minutes(30)).is_empty());
    }

    #[test]
    fn test_window_crosses_midnight() {
        let late = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(23, 50, 0)
            .unwrap();
        let mut task = task_due_in("tomorrow", 0);
        task.date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        task.time = NaiveTime::from_hms_opt(0, 10, 0);

        let tasks = vec![task];
        assert_eq!(upcoming(&tasks, late, Duration::minutes(30)).len(), 1);
    }

    #[test]
    fn test_rescan_keeps_one_reminder_per_task() {
        let tasks = vec![task_due_in("a", 10), task_due_in("b", 20)];
        let mut inbox = ReminderInbox::new();

        let first = inbox.scan(&tasks, now(), Duration::minutes(30));
        assert_eq!(first.len(), 2);
        assert_eq!(inbox.unread_count(), 2);

        let first_id = inbox.reminders()[0].id.clone();
        assert!(inbox.mark_read(&first_id));

        let again = inbox.scan(&tasks, now() + Duration::minutes(1), Duration::minutes(30));
        assert!(again.is_empty());
        assert_eq!(inbox.reminders().len(), 2);
        assert_eq!(inbox.unread_count(), 1);
        assert!(inbox.reminders().iter().any(|r| r.id == first_id && r.is_read));
    }

    #[test]
    fn test_rescheduled_task_gets_fresh_unread_reminder() {
        let mut inbox = ReminderInbox::new();
        inbox.scan(&[task_due_in("a", 10)], now(), Duration::minutes(30));
        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);

        let fresh = inbox.scan(&[task_due_in("a", 25)], now(), Duration::minutes(30));
        assert_eq!(fresh.len(), 1);
        assert_eq!(inbox.reminders().len(), 1);
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn test_deleted_task_reminder_is_dropped() {
        let mut inbox = ReminderInbox::new();
        inbox.scan(
            &[task_due_in("a", 10), task_due_in("b", 20)],
            now(),
            Duration::minutes(30),
        );
        assert_eq!(inbox.reminders().len(), 2);

        let fresh = inbox.scan(&[task_due_in("b", 20)], now(), Duration::minutes(30));
        assert!(fresh.is_empty());
        let ids: Vec<&str> = inbox.reminders().iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let mut inbox = ReminderInbox::new();
        assert!(!inbox.mark_read("missing"));
    }
}
