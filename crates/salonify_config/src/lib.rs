use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
pub mod models;
pub use models::*;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SALONIFY";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "SALONIFY_SECRET";

/// Marker value replaced by an environment variable at load time
pub const SECRET_MARKER: &str = "secret_from_env";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// `config/default.*`, `config/{RUN_ENV}.*` and `SALONIFY__SECTION__KEY`
/// environment variables. The config directory can be moved with
/// `SALONIFY_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("SALONIFY_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("default config path: {}", default_path.display());
    debug!("environment config path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator("__")
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values.
///
/// `remote_api.api_token` is looked up as `SALONIFY_SECRET_REMOTE_API_API_TOKEN`.
/// A marker without a matching variable becomes null.
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = secret_path_to_env_var(&path);
                match env::var(&env_key) {
                    Ok(env_val) => *obj = Value::String(env_val),
                    Err(_) => {
                        warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Convert a secret path to an environment variable name
pub fn secret_path_to_env_var(path: &[String]) -> String {
    format!("{}_{}", SECRET_PREFIX, path.join("_")).to_uppercase()
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to apply secrets: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path(), "test").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.scheduling.business_start, "09:00");
        assert_eq!(config.scheduling.business_end, "18:00");
        assert_eq!(config.scheduling.granularity_minutes, 30);
        assert_eq!(config.scheduling.closed_weekdays, vec![Weekday::Sun]);
        assert_eq!(config.scheduling.booking_horizon_days, 30);
        assert!(!config.use_remote_api);
        assert!(config.services.is_empty());
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 3000

[scheduling]
business_start = "10:00"
closed_weekdays = ["Sun", "Mon"]

[[services]]
id = 1
name = "Classic Manicure"
price = 2500
duration_minutes = 30
category = "MANICURE"
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            r#"
[scheduling]
business_end = "17:00"
"#,
        )
        .unwrap();

        let config = load_config_from(dir.path(), "staging").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scheduling.business_start, "10:00");
        assert_eq!(config.scheduling.business_end, "17:00");
        assert_eq!(
            config.scheduling.closed_weekdays,
            vec![Weekday::Sun, Weekday::Mon]
        );
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].duration_minutes, 30);
    }

    #[test]
    fn test_secret_marker_is_replaced_from_env() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
use_remote_api = true

[remote_api]
base_url = "http://localhost:8080/api"
api_token = "secret_from_env"
"#,
        )
        .unwrap();

        env::set_var("SALONIFY_SECRET_REMOTE_API_API_TOKEN", "token-123");
        let config = load_config_from(dir.path(), "test").unwrap();
        env::remove_var("SALONIFY_SECRET_REMOTE_API_API_TOKEN");

        let remote = config.remote_api.unwrap();
        assert_eq!(remote.api_token.as_deref(), Some("token-123"));
    }

    #[test]
    fn test_secret_path_to_env_var() {
        let path = vec!["remote_api".to_string(), "api_token".to_string()];
        assert_eq!(
            secret_path_to_env_var(&path),
            "SALONIFY_SECRET_REMOTE_API_API_TOKEN"
        );
    }
}
