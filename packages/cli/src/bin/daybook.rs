use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::auth::AuthArgs;
use cli::profile::ProfileCommands;
use cli::tasks::TasksCommands;
use daybook_cli::logging::init_tracing;
use daybook_cli::App;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Daybook - personal tasks organised by day and tag")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with e-mail and password
    Login(AuthArgs),
    /// Create an account
    Signup(AuthArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommands),
    /// Show task counts per tag
    Tags,
    /// View and edit your profile
    #[command(subcommand)]
    Profile(ProfileCommands),
    /// Watch for tasks due soon until interrupted
    Remind,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let app = App::load().await?;

    match command {
        Commands::Login(args) => cli::auth::login(&app, args).await,
        Commands::Signup(args) => cli::auth::signup(&app, args).await,
        Commands::Logout => cli::auth::logout(&app).await,
        Commands::Whoami => cli::auth::whoami(&app).await,
        Commands::Tasks(tasks_cmd) => cli::tasks::handle_tasks_command(&app, tasks_cmd).await,
        Commands::Tags => cli::tasks::show_tags(&app).await,
        Commands::Profile(profile_cmd) => {
            cli::profile::handle_profile_command(&app, profile_cmd).await
        }
        Commands::Remind => cli::remind::watch(&app).await,
    }
}
