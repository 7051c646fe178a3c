// ABOUTME: Long-running reminder watcher for tasks due soon
// ABOUTME: Reloads the list each interval and prints reminders until Ctrl-C

use colored::*;
use daybook_cli::{App, Screen};
use daybook_tasks::Reminder;
use tracing::warn;

pub async fn watch(app: &App) -> anyhow::Result<()> {
    let ctx = app.context().await?;
    Screen::Dashboard.enter(&ctx)?;

    let mut vm = app.view_model();
    let notice = vm.load(&ctx).await;
    if notice.is_error() {
        anyhow::bail!(notice.message);
    }

    let (handle, mut reminders) = app.reminder_ticker().spawn(vm.subscribe());
    let mut reload = tokio::time::interval(app.config.reminders.interval());
    // The first tick completes immediately and the list is already loaded
    reload.tick().await;

    println!(
        "{} Watching for tasks due within {} minutes (Ctrl-C to stop)",
        "⏰".yellow(),
        app.config.reminders.lead_minutes
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(reminder) = reminders.recv() => print_reminder(&reminder),
            _ = reload.tick() => {
                let notice = vm.load(&ctx).await;
                if notice.is_error() {
                    warn!("{}", notice.message);
                }
            }
        }
    }

    let inbox = handle.inbox();
    let unread = inbox.lock().await.unread_count();
    handle.stop().await;

    println!();
    println!("Stopped. {} unread reminders", unread.to_string().cyan());
    Ok(())
}

fn print_reminder(reminder: &Reminder) {
    println!(
        "{} {} is due at {} on {}",
        "🔔".yellow(),
        reminder.task_title.bold(),
        reminder.due_time.format("%H:%M"),
        reminder.due_date
    );
}
