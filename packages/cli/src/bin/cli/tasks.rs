// ABOUTME: CLI commands for listing, adding, and changing tasks
// ABOUTME: Every command loads the list through the view model and prints its notices

use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use daybook_auth::AuthContext;
use daybook_cli::{App, Screen};
use daybook_core::{parse_date, parse_time, serde_time::format_clock_time, Task};
use daybook_tags::TagSelection;
use daybook_tasks::{TaskDraft, TaskViewModel};
use inquire::Confirm;

use super::utils::{report, truncate};

#[derive(Subcommand)]
pub enum TasksCommands {
    /// List tasks (defaults to My Day)
    List {
        /// Tag to show: My Day, Important, Personal, All, Completed, or a custom tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Only titles containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Only tasks on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Existing tag to file the task under
        #[arg(short, long)]
        tag: Option<String>,
        /// New custom tag; takes precedence over --tag
        #[arg(short, long)]
        new_tag: Option<String>,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Due time (HH:MM, defaults to now)
        #[arg(long)]
        time: Option<String>,
    },
    /// Mark a task as completed
    Done {
        id: String,
        /// Mark as incomplete instead
        #[arg(long)]
        undo: bool,
    },
    /// Mark a task as important
    Star {
        id: String,
        /// Remove the important mark instead
        #[arg(long)]
        undo: bool,
    },
    /// Change a task's title
    Edit { id: String, title: String },
    /// Move a task to another tag
    Retag { id: String, tag: String },
    /// Delete a task
    Rm {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_tasks_command(app: &App, command: TasksCommands) -> anyhow::Result<()> {
    let (ctx, mut vm) = open_dashboard(app).await?;

    match command {
        TasksCommands::List { tag, search, date } => {
            if let Some(tag) = tag {
                vm.select_tag(TagSelection::from_name(tag.trim()));
            }
            if let Some(search) = search {
                vm.set_search(search);
            }
            if let Some(date) = date {
                vm.select_date(Some(parse_date(&date)?));
            }
            list_tasks(&vm);
            Ok(())
        }
        TasksCommands::Add {
            title,
            tag,
            new_tag,
            date,
            time,
        } => {
            let mut draft = TaskDraft::new(title);
            if let Some(tag) = tag {
                draft = draft.with_tag(tag);
            }
            if let Some(new_tag) = new_tag {
                draft = draft.with_new_tag(new_tag);
            }
            if let Some(date) = date {
                draft = draft.on(parse_date(&date)?);
            }
            if let Some(time) = time {
                draft = draft.at(parse_time(&time)?);
            }

            report(vm.create(&ctx, draft).await)?;
            if let Some(created) = vm.tasks().first() {
                println!("ID: {}", created.id.cyan());
            }
            Ok(())
        }
        TasksCommands::Done { id, undo } => report(vm.set_completed(&ctx, &id, !undo).await),
        TasksCommands::Star { id, undo } => report(vm.set_starred(&ctx, &id, !undo).await),
        TasksCommands::Edit { id, title } => report(vm.edit_title(&ctx, &id, &title).await),
        TasksCommands::Retag { id, tag } => report(vm.retag(&ctx, &id, &tag).await),
        TasksCommands::Rm { id, yes } => {
            let Some(task) = vm.task(&id) else {
                anyhow::bail!("Task with ID '{}' not found", id);
            };

            if !yes {
                let confirmed = Confirm::new(&format!("Delete task '{}'?", task.title))
                    .with_default(false)
                    .prompt()?;
                if !confirmed {
                    println!("{}", "Deletion cancelled".yellow());
                    return Ok(());
                }
            }

            report(vm.delete(&ctx, &id).await)
        }
    }
}

/// Gate on the dashboard route and load the signed-in user's tasks
async fn open_dashboard(app: &App) -> anyhow::Result<(AuthContext, TaskViewModel)> {
    let ctx = app.context().await?;
    Screen::Dashboard.enter(&ctx)?;

    let mut vm = app.view_model();
    let notice = vm.load(&ctx).await;
    if notice.is_error() {
        anyhow::bail!(notice.message);
    }
    Ok((ctx, vm))
}

fn list_tasks(vm: &TaskViewModel) {
    let tasks = vm.filtered();

    let mut heading = format!("📋 {}", vm.selected_tag());
    if let Some(date) = vm.selected_date() {
        heading.push_str(&format!(" on {}", date));
    }
    if !vm.search().is_empty() {
        heading.push_str(&format!(" matching '{}'", vm.search()));
    }
    println!("{}", heading.blue().bold());
    println!();

    if tasks.is_empty() {
        println!("{}", "No tasks found".yellow());
        println!("{}", "Use 'daybook tasks add' to create one".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Title", "Tag", "Date", "Time", "★", "Done"]);

    for task in &tasks {
        table.add_row(task_row(task));
    }

    println!("{}", table);
    println!("Total: {} tasks", tasks.len().to_string().cyan());
}

fn task_row(task: &Task) -> Vec<String> {
    vec![
        task.id.clone(),
        truncate(&task.title, 40),
        truncate(&task.tag, 20),
        task.date.to_string(),
        task.time.as_ref().map(format_clock_time).unwrap_or_default(),
        if task.is_starred { "★" } else { "" }.to_string(),
        if task.is_completed { "✓" } else { "" }.to_string(),
    ]
}

pub async fn show_tags(app: &App) -> anyhow::Result<()> {
    let (_ctx, vm) = open_dashboard(app).await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tag", "Tasks"]);

    for count in vm.tag_counts() {
        let name = match &count.tag {
            TagSelection::System(tag) => tag.as_str().bold().to_string(),
            TagSelection::Custom(name) => name.clone(),
        };
        table.add_row(vec![name, count.count.to_string()]);
    }

    println!("{}", table);
    Ok(())
}
