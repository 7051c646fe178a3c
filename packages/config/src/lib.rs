// ABOUTME: Daybook configuration loading and validation
// ABOUTME: TOML file defaults with environment variable overrides

pub mod config;
pub mod constants;

pub use config::{
    Backend, ConfigError, ConfigResult, DaybookConfig, ReminderConfig, SupabaseConfig,
    MAX_REMINDER_INTERVAL_SECS, MAX_REMINDER_LEAD_MINUTES,
};
