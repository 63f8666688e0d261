//! Configuration plumbing shared by the playground binaries.
//!
//! Configuration is resolved in three layers:
//!
//! 1. An optional JSON file (`--config <path>` or `$CONFIG`).
//! 2. Environment variables, used as serde defaults for fields the file omits.
//! 3. Hardcoded defaults.
//!
//! Inside the file, any string value may reference an environment variable via
//! [`LiteralOrEnv`]:
//!
//! ```json
//! {
//!   "module_address": "$MODULE_ADDRESS",
//!   "node_url": "${APTOS_NODE_URL}",
//!   "port": 3000
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A transparent wrapper that resolves environment variables during deserialization.
///
/// Supports both literal values and environment variable references:
/// - Literal: `"0xcafe"`
/// - Simple env var: `"$MODULE_ADDRESS"`
/// - Braced env var: `"${MODULE_ADDRESS}"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn from_literal(value: T) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns the variable name if the string matches `$VAR` or `${VAR}` syntax.
    fn parse_env_var_syntax(s: &str) -> Option<&str> {
        if let Some(braced) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
            Some(braced)
        } else if let Some(var_name) = s.strip_prefix('$') {
            let is_name =
                !var_name.is_empty() && var_name.chars().all(|c| c.is_alphanumeric() || c == '_');
            is_name.then_some(var_name)
        } else {
            None
        }
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for LiteralOrEnv<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let value = if let Some(var_name) = Self::parse_env_var_syntax(&s) {
            std::env::var(var_name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "Environment variable '{}' not found (referenced as '{}')",
                    var_name, s
                ))
            })?
        } else {
            s
        };

        let parsed = value
            .parse::<T>()
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {}", e)))?;

        Ok(LiteralOrEnv(parsed))
    }
}

impl<T> Serialize for LiteralOrEnv<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Environment-backed default helpers for serde `default = "..."` functions.
pub mod config_defaults {
    use std::env;
    use std::net::{IpAddr, Ipv4Addr};
    use std::str::FromStr;

    pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

    /// Returns `$PORT` if it parses, else `fallback`.
    pub fn port_or(fallback: u16) -> u16 {
        env_parsed("PORT").unwrap_or(fallback)
    }

    /// Returns `$HOST` if it parses, else `0.0.0.0`.
    pub fn default_host() -> IpAddr {
        env_parsed("HOST").unwrap_or(DEFAULT_HOST)
    }

    /// Reads and parses an environment variable; unset, empty or unparseable yields `None`.
    pub fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
        env::var(name)
            .ok()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Loads a JSON configuration file, or falls back to `T::default()` when no path is given.
///
/// `T::default()` is expected to route through the same env-backed serde defaults,
/// so an absent file and an empty `{}` file resolve identically.
pub fn load_json_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: Default + DeserializeOwned,
{
    match path {
        None => Ok(T::default()),
        Some(path) => {
            let path = path
                .canonicalize()
                .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
            let content =
                fs::read_to_string(&path).map_err(|e| ConfigError::FileRead(path, e))?;
            let config = serde_json::from_str(&content)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default)]
        name: Option<LiteralOrEnv<String>>,
        #[serde(default)]
        port: u16,
    }

    #[test]
    fn env_var_syntax() {
        assert_eq!(LiteralOrEnv::<String>::parse_env_var_syntax("$FOO_1"), Some("FOO_1"));
        assert_eq!(LiteralOrEnv::<String>::parse_env_var_syntax("${FOO}"), Some("FOO"));
        assert_eq!(LiteralOrEnv::<String>::parse_env_var_syntax("$"), None);
        assert_eq!(LiteralOrEnv::<String>::parse_env_var_syntax("$a-b"), None);
        assert_eq!(LiteralOrEnv::<String>::parse_env_var_syntax("0x1"), None);
    }

    #[test]
    fn literal_values_parse_as_is() {
        let value: LiteralOrEnv<u64> = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn missing_env_reference_is_an_error() {
        let result: Result<LiteralOrEnv<String>, _> =
            serde_json::from_str("\"$PLAYGROUND_TEST_DEFINITELY_UNSET\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("PLAYGROUND_TEST_DEFINITELY_UNSET"), "{err}");
    }

    #[test]
    fn load_json_config_reads_file_or_defaults() {
        let defaults: Sample = load_json_config(None).unwrap();
        assert!(defaults.name.is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "playground", "port": 3005 }}"#).unwrap();
        let loaded: Sample = load_json_config(Some(file.path())).unwrap();
        assert_eq!(loaded.name.unwrap().into_inner(), "playground");
        assert_eq!(loaded.port, 3005);
    }

    #[test]
    fn load_json_config_reports_missing_file() {
        let err = load_json_config::<Sample>(Some(Path::new("/nonexistent/config.json")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(..)));
    }
}
