// ABOUTME: CLI commands for signing in, signing up, and signing out
// ABOUTME: Prompts for missing credentials and persists the session file

use clap::Args;
use colored::*;
use daybook_cli::{App, CliError, Screen};
use inquire::{Password, PasswordDisplayMode, Text};

#[derive(Args)]
pub struct AuthArgs {
    /// Account e-mail address
    #[arg(short, long)]
    email: Option<String>,
    /// Account password (prompted when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

impl AuthArgs {
    fn credentials(self, confirm: bool) -> anyhow::Result<(String, String)> {
        let email = match self.email {
            Some(e) => e,
            None => Text::new("E-mail:").prompt()?,
        };

        let password = match self.password {
            Some(p) => p,
            None => {
                let prompt = Password::new("Password:").with_display_mode(PasswordDisplayMode::Masked);
                let prompt = if confirm {
                    prompt.with_custom_confirmation_message("Confirm password:")
                } else {
                    prompt.without_confirmation()
                };
                prompt.prompt()?
            }
        };

        Ok((email.trim().to_string(), password))
    }
}

/// Returns false (after telling the user) when a session already exists
async fn ensure_signed_out(app: &App, screen: Screen) -> anyhow::Result<bool> {
    let ctx = app.context().await?;
    match screen.enter(&ctx) {
        Ok(()) => Ok(true),
        Err(CliError::AlreadySignedIn) => {
            let who = ctx
                .user()
                .and_then(|u| u.email.clone())
                .or_else(|| ctx.user().map(|u| u.id.clone()))
                .unwrap_or_default();
            println!("{} {}", "Already signed in as".yellow(), who.cyan());
            println!("{}", "Use 'daybook logout' to switch accounts".dimmed());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(app: &App, args: AuthArgs) -> anyhow::Result<()> {
    if !ensure_signed_out(app, Screen::Login).await? {
        return Ok(());
    }

    let (email, password) = args.credentials(false)?;
    let ctx = app.auth.login(&email, &password).await?;
    let user_id = ctx.user().map(|u| u.id.clone()).unwrap_or_default();

    println!("{} Signed in as {}", "✓".green().bold(), user_id.cyan());
    Ok(())
}

pub async fn signup(app: &App, args: AuthArgs) -> anyhow::Result<()> {
    if !ensure_signed_out(app, Screen::Signup).await? {
        return Ok(());
    }

    let (email, password) = args.credentials(true)?;
    let ctx = app.auth.signup(&email, &password).await?;

    if ctx.is_authenticated() {
        println!("{} Account created and signed in", "✓".green().bold());
    } else {
        println!("{} Account created", "✓".green().bold());
        println!(
            "{}",
            "Check your e-mail to confirm the address, then run 'daybook login'".dimmed()
        );
    }
    Ok(())
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    let ctx = app.context().await?;
    Screen::Dashboard.enter(&ctx)?;

    app.auth.logout(ctx).await?;
    println!("{} Signed out", "✓".green().bold());
    Ok(())
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    let ctx = app.context().await?;

    match ctx.session() {
        Some(session) => {
            println!("{} {}", "User:".bold(), session.user.id);
            if let Some(email) = &session.user.email {
                println!("{} {}", "E-mail:".bold(), email);
            }
            println!(
                "{} {}",
                "Session expires:".bold(),
                session.expires_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => println!("{}", "Not signed in".yellow()),
    }
    Ok(())
}
