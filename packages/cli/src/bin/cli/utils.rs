use colored::*;
use daybook_tasks::Notice;

/// Print a success notice, or turn an error notice into a failed command
pub fn report(notice: Notice) -> anyhow::Result<()> {
    if notice.is_error() {
        anyhow::bail!(notice.message);
    }
    println!("{} {}", "✓".green().bold(), notice.message);
    Ok(())
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
