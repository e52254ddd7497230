
use serde::{Deserialize, Serialize};

// --- Calendar Config ---
/// Time zone used to map booking instants onto calendar days.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub timezone: String, // IANA name, e.g. "Europe/Zurich"
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

// --- Autocomplete Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Delay before a query is sent, 0 disables debouncing.
    pub settle_delay_ms: u64,
    /// Trimmed queries shorter than this never reach the suggestion source.
    pub min_query_length: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 0,
            min_query_length: 3,
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    // When set, logs are also written to a daily rolling file in this directory
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "stationcal.log".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub calendar: CalendarConfig,
    pub autocomplete: AutocompleteConfig,
    pub logging: LoggingConfig,
}
