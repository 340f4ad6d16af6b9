use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_BASE_URL: &str = "https://www.disneyholidays.co.uk/walt-disney-world/";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
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
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{raw} is not a finite number"),
            })
        }
    };

    let base_url = or_default("FAREPROBE_BASE_URL", DEFAULT_BASE_URL);
    let log_level = or_default("FAREPROBE_LOG_LEVEL", "info");
    let search_path = PathBuf::from(or_default("FAREPROBE_SEARCH_PATH", "./config/search.yaml"));
    let output_dir = PathBuf::from(or_default("FAREPROBE_OUTPUT_DIR", "./output"));
    let user_agent = or_default("FAREPROBE_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("FAREPROBE_REQUEST_TIMEOUT_SECS", "20")?;
    let search_sleep_secs = parse_f64("FAREPROBE_SEARCH_SLEEP_SECS", "2")?;
    let pagination_sleep_secs = parse_f64("FAREPROBE_PAGINATION_SLEEP_SECS", "1")?;
    let backoff_base = parse_f64("FAREPROBE_BACKOFF_BASE", "2")?;
    let max_attempts = parse_u32("FAREPROBE_MAX_ATTEMPTS", "3")?;
    let max_workers = parse_usize("FAREPROBE_MAX_WORKERS", "10")?;

    let config = AppConfig {
        base_url,
        log_level,
        search_path,
        output_dir,
        user_agent,
        request_timeout_secs,
        search_sleep_secs,
        pagination_sleep_secs,
        backoff_base,
        max_attempts,
        max_workers,
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.base_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "FAREPROBE_BASE_URL must be non-empty".to_string(),
        ));
    }
    check_sleep_bound("FAREPROBE_SEARCH_SLEEP_SECS", config.search_sleep_secs)?;
    check_sleep_bound("FAREPROBE_PAGINATION_SLEEP_SECS", config.pagination_sleep_secs)?;
    if config.backoff_base < 1.0 {
        return Err(ConfigError::Validation(
            "FAREPROBE_BACKOFF_BASE must be at least 1".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "FAREPROBE_REQUEST_TIMEOUT_SECS must be positive".to_string(),
        ));
    }
    if config.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "FAREPROBE_MAX_ATTEMPTS must be positive".to_string(),
        ));
    }
    if config.max_workers == 0 {
        return Err(ConfigError::Validation(
            "FAREPROBE_MAX_WORKERS must be positive".to_string(),
        ));
    }
    Ok(())
}

fn check_sleep_bound(var: &str, secs: f64) -> Result<(), ConfigError> {
    if !(AppConfig::MIN_SLEEP_SECS..=AppConfig::MAX_SLEEP_SECS).contains(&secs) {
        return Err(ConfigError::Validation(format!(
            "{var} must be between {} and {} seconds (got {secs})",
            AppConfig::MIN_SLEEP_SECS,
            AppConfig::MAX_SLEEP_SECS
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
