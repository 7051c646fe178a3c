// ABOUTME: CLI commands for the account page: show, update, and avatar upload
// ABOUTME: Prompts with the current values when no flags are given

use clap::Subcommand;
use colored::*;
use daybook_cli::{App, Screen};
use daybook_core::{parse_date, Profile, ProfileUpdate};
use inquire::Text;
use std::path::PathBuf;

use super::utils::or_dash;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,
    /// Update profile fields (prompts when no flags are given)
    Update {
        #[arg(long)]
        full_name: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: Option<String>,
        #[arg(long)]
        about: Option<String>,
    },
    /// Upload a new avatar image
    Avatar {
        /// Image file to upload
        path: PathBuf,
    },
}

pub async fn handle_profile_command(app: &App, command: ProfileCommands) -> anyhow::Result<()> {
    let ctx = app.context().await?;
    Screen::Account.enter(&ctx)?;

    match command {
        ProfileCommands::Show => {
            let user_id = ctx.user().map(|u| u.id.clone()).unwrap_or_default();
            let profile = app
                .profiles
                .get(&ctx)
                .await?
                .unwrap_or_else(|| Profile::empty(user_id));
            print_profile(&profile);
            Ok(())
        }
        ProfileCommands::Update {
            full_name,
            date_of_birth,
            about,
        } => {
            let update = if full_name.is_none() && date_of_birth.is_none() && about.is_none() {
                let current = app.profiles.get(&ctx).await?;
                prompt_update(current.as_ref())?
            } else {
                ProfileUpdate {
                    full_name,
                    avatar_url: None,
                    date_of_birth: date_of_birth.as_deref().map(parse_date).transpose()?,
                    about,
                }
            };

            match app.profiles.update(&ctx, update).await {
                Ok(profile) => {
                    println!("{} Profile updated successfully!", "✓".green().bold());
                    print_profile(&profile);
                    Ok(())
                }
                Err(e) => anyhow::bail!("Failed to update profile: {}", e),
            }
        }
        ProfileCommands::Avatar { path } => {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            match app.profiles.upload_avatar(&ctx, &file_name, bytes).await {
                Ok(url) => {
                    println!("{} Avatar uploaded successfully!", "✓".green().bold());
                    println!("URL: {}", url.cyan());
                    Ok(())
                }
                Err(e) => anyhow::bail!("Failed to upload avatar: {}", e),
            }
        }
    }
}

fn prompt_update(current: Option<&Profile>) -> anyhow::Result<ProfileUpdate> {
    let full_name = Text::new("Full name:")
        .with_default(current.and_then(|p| p.full_name.as_deref()).unwrap_or(""))
        .prompt()?;

    let current_dob = current
        .and_then(|p| p.date_of_birth)
        .map(|d| d.to_string())
        .unwrap_or_default();
    let date_of_birth = Text::new("Date of birth (YYYY-MM-DD):")
        .with_default(&current_dob)
        .prompt()?;

    let about = Text::new("About:")
        .with_default(current.and_then(|p| p.about.as_deref()).unwrap_or(""))
        .prompt()?;

    Ok(ProfileUpdate {
        full_name: non_blank(full_name),
        avatar_url: None,
        date_of_birth: non_blank(date_of_birth)
            .as_deref()
            .map(parse_date)
            .transpose()?,
        about: non_blank(about),
    })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn print_profile(profile: &Profile) {
    println!("{}", "👤 Profile".blue().bold());
    println!();
    println!("{:<15} {}", "User:".bold(), profile.id);
    println!("{:<15} {}", "Full name:".bold(), or_dash(profile.full_name.as_deref()));
    println!(
        "{:<15} {}",
        "Date of birth:".bold(),
        or_dash(profile.date_of_birth.map(|d| d.to_string()).as_deref())
    );
    println!("{:<15} {}", "About:".bold(), or_dash(profile.about.as_deref()));
    println!("{:<15} {}", "Avatar:".bold(), or_dash(profile.avatar_url.as_deref()));
    if let Some(updated_at) = profile.updated_at {
        println!("{:<15} {}", "Updated:".bold(), updated_at.format("%Y-%m-%d %H:%M"));
    }
}
