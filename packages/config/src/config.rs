use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config format: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid backend: {0} (expected 'supabase' or 'local')")]
    InvalidBackend(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Supabase project URL is required")]
    MissingUrl,
    #[error("Supabase anonymous key is required")]
    MissingAnonKey,
    #[error("Supabase project URL must use HTTPS: {0}")]
    InsecureUrl(String),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{key} must be at most {max}")]
    TooLarge { key: &'static str, max: u64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which store and auth service the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Supabase,
    /// Offline single-machine mode backed by SQLite
    Local,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(Backend::Supabase),
            "local" => Ok(Backend::Local),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Supabase project URL
    pub url: String,
    /// Supabase anonymous key
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

/// One week
pub const MAX_REMINDER_LEAD_MINUTES: u64 = 7 * 24 * 60;
/// One day
pub const MAX_REMINDER_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// How often the reminder ticker scans the task list
    pub interval_secs: u64,
    /// How far ahead of a task's due time a reminder is raised
    pub lead_minutes: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            lead_minutes: 30,
        }
    }
}

impl ReminderConfig {
    /// Clamped to `MAX_REMINDER_INTERVAL_SECS`
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.min(MAX_REMINDER_INTERVAL_SECS))
    }

    /// Clamped to `MAX_REMINDER_LEAD_MINUTES`
    pub fn lead(&self) -> chrono::Duration {
        let minutes = self.lead_minutes.min(MAX_REMINDER_LEAD_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaybookConfig {
    pub backend: Backend,
    pub supabase: SupabaseConfig,
    pub reminders: ReminderConfig,
    pub http_timeout_secs: u64,
    /// Overrides ~/.daybook for the session file, database and avatars
    pub data_dir: Option<PathBuf>,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            supabase: SupabaseConfig::default(),
            reminders: ReminderConfig::default(),
            http_timeout_secs: 30,
            data_dir: None,
        }
    }
}

impl DaybookConfig {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(DAYBOOK_CONFIG) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
            .join("config.toml")
    }

    /// Load the config file (if any), apply environment overrides and validate
    pub fn load() -> ConfigResult<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from disk; a missing file yields defaults
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(DAYBOOK_BACKEND) {
            self.backend = backend.parse()?;
        }
        if let Some(url) = lookup(DAYBOOK_SUPABASE_URL) {
            self.supabase.url = url.trim_end_matches('/').to_string();
        }
        if let Some(anon_key) = lookup(DAYBOOK_SUPABASE_ANON_KEY) {
            self.supabase.anon_key = anon_key;
        }
        if let Some(dir) = lookup(DAYBOOK_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = lookup(DAYBOOK_REMINDER_INTERVAL_SECS) {
            self.reminders.interval_secs = parse_number(DAYBOOK_REMINDER_INTERVAL_SECS, &value)?;
        }
        if let Some(value) = lookup(DAYBOOK_REMINDER_LEAD_MINUTES) {
            self.reminders.lead_minutes = parse_number(DAYBOOK_REMINDER_LEAD_MINUTES, &value)?;
        }
        if let Some(value) = lookup(DAYBOOK_HTTP_TIMEOUT_SECS) {
            self.http_timeout_secs = parse_number(DAYBOOK_HTTP_TIMEOUT_SECS, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.backend == Backend::Supabase {
            if self.supabase.url.is_empty() {
                return Err(ConfigError::MissingUrl);
            }
            if self.supabase.anon_key.is_empty() {
                return Err(ConfigError::MissingAnonKey);
            }
            if !is_secure_url(&self.supabase.url) {
                return Err(ConfigError::InsecureUrl(self.supabase.url.clone()));
            }
        }
        if self.reminders.interval_secs == 0 {
            return Err(ConfigError::NotPositive("reminders.interval_secs"));
        }
        if self.reminders.interval_secs > MAX_REMINDER_INTERVAL_SECS {
            return Err(ConfigError::TooLarge {
                key: "reminders.interval_secs",
                max: MAX_REMINDER_INTERVAL_SECS,
            });
        }
        if self.reminders.lead_minutes == 0 {
            return Err(ConfigError::NotPositive("reminders.lead_minutes"));
        }
        if self.reminders.lead_minutes > MAX_REMINDER_LEAD_MINUTES {
            return Err(ConfigError::TooLarge {
                key: "reminders.lead_minutes",
                max: MAX_REMINDER_LEAD_MINUTES,
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::NotPositive("http_timeout_secs"));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(daybook_core::daybook_dir)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join("session.toml")
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join(daybook_core::DEFAULT_DB_FILE)
    }

    pub fn avatar_dir(&self) -> PathBuf {
        self.data_dir().join("avatars")
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_number(key: &'static str, value: &str) -> ConfigResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

/// HTTPS everywhere, plain HTTP only for a local Supabase stack
fn is_secure_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => match parsed.scheme() {
            "https" => true,
            "http" => matches!(
                parsed.host_str(),
                Some("localhost") | Some("127.0.0.1") | Some("[::1]")
            ),
            _ => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaybookConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DaybookConfig::default());
        assert_eq!(config.reminders.interval_secs, 60);
        assert_eq!(config.reminders.lead_minutes, 30);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
backend = "local"

[reminders]
lead_minutes = 15
"#,
        )
        .unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.reminders.lead_minutes, 15);
        assert_eq!(config.reminders.interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = DaybookConfig::default();
        config
            .apply_overrides(lookup(&[
                (DAYBOOK_SUPABASE_URL, "https://demo.supabase.co/"),
                (DAYBOOK_SUPABASE_ANON_KEY, "anon"),
                (DAYBOOK_REMINDER_INTERVAL_SECS, "10"),
            ]))
            .unwrap();

        assert_eq!(config.supabase.url, "https://demo.supabase.co");
        assert_eq!(config.supabase.anon_key, "anon");
        assert_eq!(config.reminders.interval_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = DaybookConfig::default();
        let err = config
            .apply_overrides(lookup(&[(DAYBOOK_REMINDER_LEAD_MINUTES, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = config
            .apply_overrides(lookup(&[(DAYBOOK_BACKEND, "firebase")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend(_)));
    }

    #[test]
    fn test_supabase_backend_requires_credentials() {
        let mut config = DaybookConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingUrl)));

        config.supabase = SupabaseConfig::new("http://example.com", "anon");
        assert!(matches!(config.validate(), Err(ConfigError::InsecureUrl(_))));

        config.supabase = SupabaseConfig::new("http://localhost:54321", "anon");
        assert!(config.validate().is_ok());

        config.supabase.anon_key.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingAnonKey)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = DaybookConfig {
            backend: Backend::Local,
            ..Default::default()
        };
        config.reminders.interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive(_))));
    }

    #[test]
    fn test_oversized_reminder_settings_rejected() {
        let mut config = DaybookConfig {
            backend: Backend::Local,
            ..Default::default()
        };
        config
            .apply_overrides(lookup(&[(DAYBOOK_REMINDER_LEAD_MINUTES, "200000000000000")]))
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { key: "reminders.lead_minutes", .. })
        ));

        config.reminders.lead_minutes = MAX_REMINDER_LEAD_MINUTES;
        assert!(config.validate().is_ok());

        config.reminders.interval_secs = MAX_REMINDER_INTERVAL_SECS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { key: "reminders.interval_secs", .. })
        ));
    }

    #[test]
    fn test_lead_never_overflows() {
        let reminders = ReminderConfig {
            interval_secs: u64::MAX,
            lead_minutes: u64::MAX,
        };
        assert_eq!(
            reminders.lead(),
            chrono::Duration::minutes(MAX_REMINDER_LEAD_MINUTES as i64)
        );
        assert_eq!(
            reminders.interval(),
            Duration::from_secs(MAX_REMINDER_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let config = DaybookConfig {
            data_dir: Some(PathBuf::from("/tmp/daybook-test")),
            ..Default::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/daybook-test/daybook.db"));
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/daybook-test/session.toml")
        );
        assert_eq!(config.avatar_dir(), PathBuf::from("/tmp/daybook-test/avatars"));
    }
}
