use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let sentiment_url = require("EMODASH_SENTIMENT_URL")?;
    let emotion_url = require("EMODASH_EMOTION_URL")?;

    let env = parse_environment(&or_default("EMODASH_ENV", "development"));
    let log_level = or_default("EMODASH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("EMODASH_REQUEST_TIMEOUT_SECS", "60")?;
    let sentiment_batch_size = parse_positive_usize("EMODASH_SENTIMENT_BATCH_SIZE", "32")?;
    let preview_limit = parse_positive_usize("EMODASH_PREVIEW_LIMIT", "10")?;
    let preview_chars = parse_positive_usize("EMODASH_PREVIEW_CHARS", "150")?;

    let sentiment_model = or_default(
        "EMODASH_SENTIMENT_MODEL",
        "distilbert-base-uncased-finetuned-sst-2-english",
    );
    let emotion_model = or_default("EMODASH_EMOTION_MODEL", "SamLowe/roberta-base-go_emotions");

    Ok(AppConfig {
        sentiment_url,
        emotion_url,
        env,
        log_level,
        request_timeout_secs,
        sentiment_batch_size,
        preview_limit,
        preview_chars,
        sentiment_model,
        emotion_model,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
