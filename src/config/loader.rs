//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Environment variable overriding the `env` key.
pub const ENV_OVERRIDE: &str = "ENV";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config path is not set")]
    PathNotSet,

    #[error("config file does not exist: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the config file to load.
///
/// A non-empty `$CONFIG_PATH` wins; the `--config` flag is only consulted
/// when the variable is unset or empty.
pub fn resolve_config_path(
    env_value: Option<String>,
    flag: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => flag
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::PathNotSet),
    }
}

/// Load and validate configuration from a TOML file.
///
/// A non-empty `$ENV` replaces the file's `env` value before validation.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "Loading config");
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;

    if let Ok(env) = std::env::var(ENV_OVERRIDE) {
        if !env.trim().is_empty() {
            config.env = env;
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse configuration text without touching the environment.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            env = "production"
            storage_path = "storage/storage.db"

            [http_server]
            address = "0.0.0.0:8082"

            [timeouts]
            request_secs = 10

            [shutdown]
            grace_period_secs = 2

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.env, "production");
        assert_eq!(config.storage_path, "storage/storage.db");
        assert_eq!(config.http_server.address, "0.0.0.0:8082");
        assert_eq!(config.timeouts.request_secs, Some(10));
        assert_eq!(config.shutdown.grace_period_secs, 2);
        assert_eq!(config.observability.log_level, "debug");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = parse_config(
            r#"
            env = "local"
            storage_path = "db.sqlite"

            [http_server]
            address = "127.0.0.1:8082"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeouts.request_secs, None);
        assert_eq!(config.shutdown.grace_period_secs, 5);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_missing_required_key() {
        let err = parse_config("env = \"local\"\n[http_server]\naddress = \"127.0.0.1:1\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_path_env_wins_over_flag() {
        let path = resolve_config_path(
            Some("from-env.toml".into()),
            Some(PathBuf::from("from-flag.toml")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("from-env.toml"));
    }

    #[test]
    fn test_config_path_falls_back_to_flag() {
        let path = resolve_config_path(Some(String::new()), Some(PathBuf::from("from-flag.toml")))
            .unwrap();
        assert_eq!(path, PathBuf::from("from-flag.toml"));

        let path = resolve_config_path(None, Some(PathBuf::from("from-flag.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("from-flag.toml"));
    }

    #[test]
    fn test_config_path_not_set() {
        assert!(matches!(
            resolve_config_path(None, None),
            Err(ConfigError::PathNotSet)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
