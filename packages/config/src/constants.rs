// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Daybook

// Backend Selection
pub const DAYBOOK_BACKEND: &str = "DAYBOOK_BACKEND";

// Supabase Configuration
pub const DAYBOOK_SUPABASE_URL: &str = "DAYBOOK_SUPABASE_URL";
pub const DAYBOOK_SUPABASE_ANON_KEY: &str = "DAYBOOK_SUPABASE_ANON_KEY";

// Local Storage
pub const DAYBOOK_DATA_DIR: &str = "DAYBOOK_DATA_DIR";

// Reminder Configuration
pub const DAYBOOK_REMINDER_INTERVAL_SECS: &str = "DAYBOOK_REMINDER_INTERVAL_SECS";
pub const DAYBOOK_REMINDER_LEAD_MINUTES: &str = "DAYBOOK_REMINDER_LEAD_MINUTES";

// HTTP Client
pub const DAYBOOK_HTTP_TIMEOUT_SECS: &str = "DAYBOOK_HTTP_TIMEOUT_SECS";

// Config file location override
pub const DAYBOOK_CONFIG: &str = "DAYBOOK_CONFIG";
