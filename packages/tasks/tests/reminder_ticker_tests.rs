// ABOUTME: Integration tests for the reminder ticker lifecycle
// ABOUTME: Uses paused tokio time so interval ticks run instantly

mod common;

use chrono::{Duration, Utc};
use common::{clock, now};
use daybook_config::ReminderConfig;
use daybook_core::Task;
use daybook_tasks::{ReminderTicker, TaskSnapshot};
use std::sync::Arc;
use tokio::sync::watch;

fn due_in(id: &str, title: &str, minutes: i64) -> Task {
    let due = now() + Duration::minutes(minutes);
    Task {
        id: id.to_string(),
        user_id: "u1".to_string(),
        title: title.to_string(),
        tag: "Personal".to_string(),
        date: due.date(),
        time: Some(due.time()),
        is_starred: false,
        is_completed: false,
        created_at: Utc::now(),
    }
}

fn ticker() -> ReminderTicker {
    ReminderTicker::new(&ReminderConfig::default(), Arc::new(clock()))
}

#[tokio::test(start_paused = true)]
async fn test_first_scan_runs_immediately() {
    let snapshot: TaskSnapshot = Arc::new(vec![
        due_in("t1", "Call mom", 15),
        due_in("t2", "Later", 90),
    ]);
    let (_tx, tasks) = watch::channel(snapshot);

    let (handle, mut rx) = ticker().spawn(tasks);

    let reminder = rx.recv().await.unwrap();
    assert_eq!(reminder.task_id, "t1");
    assert_eq!(reminder.task_title, "Call mom");
    assert!(!reminder.is_read);

    let inbox = handle.inbox();
    assert_eq!(inbox.lock().await.unread_count(), 1);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_later_ticks_see_new_snapshots() {
    let (tx, tasks) = watch::channel::<TaskSnapshot>(Arc::new(Vec::new()));
    let (handle, mut rx) = ticker().spawn(tasks);

    tx.send_replace(Arc::new(vec![due_in("t1", "Pick up kids", 20)]));

    let reminder = rx.recv().await.unwrap();
    assert_eq!(reminder.task_title, "Pick up kids");
    assert!(handle.is_running());

    // Same task on the next tick does not produce a second reminder
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(handle.inbox().lock().await.reminders().len(), 1);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_ticker() {
    let (_tx, tasks) = watch::channel::<TaskSnapshot>(Arc::new(Vec::new()));
    let (handle, mut rx) = ticker().spawn(tasks);
    drop(handle);

    // The sender goes away once the ticker loop exits
    assert!(rx.recv().await.is_none());
}
