//! Configuration management
//!
//! Configuration is loaded from a YAML file (config.yml by default) and can
//! be overridden by environment variables. Missing values are filled with
//! sensible defaults; the one exception is the token signing secret, which
//! has no usable default and is checked by [`Config::validate`] at startup.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin ("*" allows any origin)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3003
}

fn default_cors_origin() -> String {
    "*".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/bloglist.db".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Secret used to sign bearer tokens. Must be non-empty; the process
    /// refuses to start without one (see [`Config::validate`]).
    #[serde(default)]
    pub token_secret: String,
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file yields the default configuration; a file with
    /// invalid YAML is an error carrying the parse location.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Recognized variables:
    /// - BLOGLIST_SERVER_HOST
    /// - BLOGLIST_SERVER_PORT
    /// - BLOGLIST_SERVER_CORS_ORIGIN
    /// - BLOGLIST_DATABASE_URL
    /// - BLOGLIST_AUTH_TOKEN_SECRET
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("BLOGLIST_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BLOGLIST_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("BLOGLIST_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }
        if let Ok(url) = std::env::var("BLOGLIST_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("BLOGLIST_AUTH_TOKEN_SECRET") {
            self.auth.token_secret = secret;
        }
    }

    /// Check that the loaded configuration is usable.
    ///
    /// Tokens signed with an empty secret would be forgeable by anyone, so
    /// startup fails instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.token_secret must be set (config file or BLOGLIST_AUTH_TOKEN_SECRET)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that touch environment variables.
// Both `tests` and `property_tests` modules use this to prevent races.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ALL_ENV_VARS: &[&str] = &[
    "BLOGLIST_SERVER_HOST",
    "BLOGLIST_SERVER_PORT",
    "BLOGLIST_SERVER_CORS_ORIGIN",
    "BLOGLIST_DATABASE_URL",
    "BLOGLIST_AUTH_TOKEN_SECRET",
];

/// Lock the env mutex and remove any leftover override variables.
#[cfg(test)]
fn lock_clean_env() -> std::sync::MutexGuard<'static, ()> {
    let guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    for var in ALL_ENV_VARS {
        std::env::remove_var(var);
    }
    guard
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
            Just("localhost".to_string()),
            "[a-z][a-z0-9]{0,10}",
        ]
    }

    fn partial_config_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (valid_host_strategy(), 1u16..=65535).prop_map(|(host, port)| format!(
                "server:\n  host: \"{}\"\n  port: {}\n",
                host, port
            )),
            Just("database:\n  url: \"test.db\"\n".to_string()),
            Just("auth:\n  token_secret: \"abc\"\n".to_string()),
            Just("server:\n  port: 9000\n".to_string()),
            Just("".to_string()),
            Just("   \n\n   ".to_string()),
        ]
    }

    fn malformed_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("server:\n  port: not_a_number".to_string()),
            Just("server:\n  port: \"3003\"".to_string()),
            Just("server:\n  port: [1, 2, 3]".to_string()),
            Just("server:\n  port: 99999999999999999999".to_string()),
            Just("server: [invalid, list, for, server]".to_string()),
            Just("database: \"just_a_string\"".to_string()),
            Just("auth: 42".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Serializing any valid config to YAML and loading it back yields
        /// the same values.
        #[test]
        fn property_config_roundtrip(
            host in valid_host_strategy(),
            port in 1u16..=65535,
            url in "[a-z][a-z0-9_/]{0,20}\\.db",
            secret in "[a-zA-Z0-9]{0,32}",
        ) {
            let config = Config {
                server: ServerConfig { host: host.clone(), port, cors_origin: "*".to_string() },
                database: DatabaseConfig { url: url.clone() },
                auth: AuthConfig { token_secret: secret.clone() },
            };

            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(parsed.server.host, host);
            prop_assert_eq!(parsed.server.port, port);
            prop_assert_eq!(parsed.database.url, url);
            prop_assert_eq!(parsed.auth.token_secret, secret);
        }

        /// Any partial config file loads successfully with defaults filled in
        /// for everything it omits.
        #[test]
        fn property_partial_config_fills_defaults(yaml in partial_config_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let config = Config::load(file.path()).expect("Failed to parse config");

            prop_assert!(!config.server.host.is_empty());
            prop_assert!(config.server.port > 0);
            prop_assert!(!config.database.url.is_empty());

            if yaml.trim().is_empty() {
                prop_assert_eq!(config.server.host, "0.0.0.0");
                prop_assert_eq!(config.server.port, 3003);
                prop_assert_eq!(config.database.url, "data/bloglist.db");
            }
        }

        /// Malformed YAML always produces a descriptive error, never a panic
        /// or silent default.
        #[test]
        fn property_malformed_config_is_an_error(yaml in malformed_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let result = Config::load(file.path());

            prop_assert!(result.is_err());
            let err_msg = result.unwrap_err().to_string();
            prop_assert!(err_msg.len() > 10, "error should be descriptive: {}", err_msg);
        }

        /// An environment override always wins over the file value.
        #[test]
        fn property_env_precedence_over_file(
            file_port in 1000u16..2000,
            env_port in 3000u16..4000,
        ) {
            let _guard = super::lock_clean_env();

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "server:\n  port: {}\n", file_port).expect("Failed to write config");

            std::env::set_var("BLOGLIST_SERVER_PORT", env_port.to_string());

            let config = Config::load_with_env(file.path()).expect("Failed to load config");

            prop_assert_eq!(config.server.port, env_port);

            std::env::remove_var("BLOGLIST_SERVER_PORT");
        }
    }
}
