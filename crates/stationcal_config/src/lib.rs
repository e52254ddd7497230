use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::debug;
pub mod models;
pub use models::*;
pub use config::ConfigError;


/// Environment variable prefix used when `PREFIX` is not set.
pub const DEFAULT_PREFIX: &str = "STATIONCAL";

/// Loads the layered application configuration.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults
/// 2. `{CONFIG_DIR}/default.*` (CONFIG_DIR defaults to `config`)
/// 3. `{CONFIG_DIR}/{RUN_ENV}.*` (RUN_ENV defaults to `debug`)
/// 4. environment variables `{PREFIX}_<SECTION>__<KEY>` (PREFIX defaults to `STATIONCAL`)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    load_config_from(Path::new(&config_dir), &prefix)
}

/// Loads configuration from an explicit directory and environment prefix.
pub fn load_config_from(config_dir: &Path, prefix: &str) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let config: AppConfig = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Rejects values the calendar and autocomplete components cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar
            .timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|err| {
                ConfigError::Message(format!(
                    "calendar.timezone '{}' is not a known time zone: {err}",
                    self.calendar.timezone
                ))
            })?;
        if self.autocomplete.min_query_length == 0 {
            return Err(ConfigError::Message(
                "autocomplete.min_query_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment once.
///
/// The path is taken from `DOTENV_OVERRIDE` and falls back to `.env`. A missing
/// file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
