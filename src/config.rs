use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const APP_ENV_VAR: &str = "APP_ENV";

const DEFAULT_DATABASE_URL: &str = "sqlite://volley_league.db";
const DEFAULT_SESSION_COOKIE: &str = "session_token";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not in the correct format: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: Ipv4Addr,
    pub port: u16,
    pub app_env: String,
    pub auth_url: Option<String>,
    pub auth_secret: Option<String>,
    pub session_cookie: String,
    pub debug_routes: bool,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_env = get(APP_ENV_VAR).unwrap_or_else(|| "development".to_string());

        let debug_routes = match get("ENABLE_DEBUG_ROUTES") {
            Some(value) => parse_bool("ENABLE_DEBUG_ROUTES", &value)?,
            None => app_env != "production",
        };

        let database_max_connections: u32 =
            parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(AppConfig {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections,
            host: parse_or("HOST", get("HOST"), Ipv4Addr::LOCALHOST)?,
            port: parse_or("PORT", get("PORT"), 3000)?,
            app_env,
            auth_url: get("AUTH_URL"),
            auth_secret: get("AUTH_SECRET"),
            session_cookie: get("SESSION_COOKIE_NAME").unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
            debug_routes,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.addr(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.app_env, "development");
        assert_eq!(config.session_cookie, "session_token");
        assert!(config.auth_secret.is_none());
        assert!(config.debug_routes);
    }

    #[test]
    fn production_disables_debug_routes_by_default() {
        let config = config_from(&[("APP_ENV", "production")]).unwrap();
        assert!(config.is_production());
        assert!(!config.debug_routes);

        let config = config_from(&[("APP_ENV", "production"), ("ENABLE_DEBUG_ROUTES", "true")]).unwrap();
        assert!(config.debug_routes);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[("AUTH_SECRET", "  "), ("PORT", "")]).unwrap();
        assert!(config.auth_secret.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            config_from(&[("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid { key: "PORT", value: "eighty".to_string() }
        );
        assert!(config_from(&[("HOST", "localhost")]).is_err());
        assert!(config_from(&[("ENABLE_DEBUG_ROUTES", "maybe")]).is_err());
    }

    #[test]
    fn pool_needs_at_least_one_connection() {
        assert_eq!(
            config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err(),
            ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", value: "0".to_string() }
        );
        assert!(config_from(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());

        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "1")]).unwrap();
        assert_eq!(config.database_max_connections, 1);
    }
}
