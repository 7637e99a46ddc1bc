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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let open_weather_api_key = require("OPEN_WEATHER_MAP_API_KEY")?;
    let domain = require("WINDROSE_DOMAIN")?;

    let env = parse_environment(&or_default("WINDROSE_ENV", "development"));

    let bind_addr = parse_addr("WINDROSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("WINDROSE_LOG_LEVEL", "info");

    let max_distance_km = parse_u32("WINDROSE_MAX_DISTANCE_KM", "25")?;
    // The site display-radius interpolation divides by the radius, so a zero
    // radius must never reach the POI engine.
    if max_distance_km == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WINDROSE_MAX_DISTANCE_KM".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let overpass_url = or_default(
        "WINDROSE_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let tracking_url = lookup("WINDROSE_TRACKING_URL").ok();
    let request_timeout_secs = parse_u64("WINDROSE_REQUEST_TIMEOUT_SECS", "15")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        domain,
        max_distance_km,
        overpass_url,
        open_weather_api_key,
        tracking_url,
        request_timeout_secs,
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
