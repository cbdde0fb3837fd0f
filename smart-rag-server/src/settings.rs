//! Process settings loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smart_rag::{RagConfig, RagError};
use thiserror::Error;

/// Errors raised while loading [`AppSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// The environment variable name.
        key: String,
        /// The raw value.
        value: String,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    /// The assembled RAG configuration failed validation.
    #[error(transparent)]
    Rag(#[from] RagError),
}

/// Application settings.
///
/// Built once at startup and passed to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Human-readable service name reported by the health endpoint.
    pub app_name: String,
    /// Deployment environment label (`local`, `staging`, ...).
    pub environment: String,
    /// Verbose diagnostics toggle.
    pub debug: bool,
    /// Path prefix for all v1 routes.
    pub api_v1_prefix: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Indexing and retrieval parameters.
    pub rag: RagConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "Smart RAG Assistant".to_string(),
            environment: "local".to_string(),
            debug: false,
            api_v1_prefix: "/api/v1".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            rag: RagConfig::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from a `.env` file (if present) and the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        apply_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup("APP_NAME") {
            settings.app_name = value;
        }
        if let Some(value) = lookup("ENVIRONMENT") {
            settings.environment = value;
        }
        if let Some(value) = lookup("DEBUG") {
            settings.debug = parse_bool("DEBUG", &value)?;
        }
        if let Some(value) = lookup("API_V1_PREFIX") {
            settings.api_v1_prefix = normalize_prefix(&value);
        }
        if let Some(value) = lookup("HOST") {
            settings.host = value;
        }
        if let Some(value) = lookup("PORT") {
            settings.port = parse("PORT", &value)?;
        }
        if let Some(value) = lookup("RAG_COLLECTION_NAME") {
            settings.rag.collection_name = value;
        }
        if let Some(value) = lookup("RAG_DEFAULT_TOP_K") {
            settings.rag.default_top_k = parse("RAG_DEFAULT_TOP_K", &value)?;
        }
        if let Some(value) = lookup("RAG_MAX_CONTEXT_CHARS") {
            settings.rag.max_context_chars = parse("RAG_MAX_CONTEXT_CHARS", &value)?;
        }
        if let Some(value) = lookup("EMBEDDING_MODEL_NAME") {
            settings.rag.embedding_model_name = value;
        }

        settings.rag.validate()?;
        Ok(settings)
    }
}

/// A missing `.env` is not an error; anything else about it is.
fn apply_dotenv(result: dotenvy::Result<PathBuf>) -> Result<(), SettingsError> {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue { key: key.to_string(), value: value.to_string() })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue { key: key.to_string(), value: value.to_string() }),
    }
}

/// Ensure a leading `/` and drop trailing ones. The root prefix becomes `""`.
fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppSettings, SettingsError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = load(&[]).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.app_name, "Smart RAG Assistant");
        assert_eq!(settings.environment, "local");
        assert_eq!(settings.api_v1_prefix, "/api/v1");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.rag.default_top_k, 5);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = load(&[
            ("APP_NAME", "My Custom Name"),
            ("ENVIRONMENT", "staging"),
            ("DEBUG", "TRUE"),
            ("PORT", "9000"),
            ("RAG_COLLECTION_NAME", "custom_collection"),
            ("RAG_DEFAULT_TOP_K", "10"),
            ("RAG_MAX_CONTEXT_CHARS", "2000"),
        ])
        .unwrap();
        assert_eq!(settings.app_name, "My Custom Name");
        assert_eq!(settings.environment, "staging");
        assert!(settings.debug);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.rag.collection_name, "custom_collection");
        assert_eq!(settings.rag.default_top_k, 10);
        assert_eq!(settings.rag.max_context_chars, 2000);
    }

    #[test]
    fn unparseable_values_are_reported() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "PORT"));
        assert!(load(&[("DEBUG", "maybe")]).is_err());
    }

    #[test]
    fn invalid_rag_config_is_rejected() {
        assert!(matches!(load(&[("RAG_DEFAULT_TOP_K", "0")]), Err(SettingsError::Rag(_))));
    }

    #[test]
    fn missing_dotenv_is_ignored_but_malformed_is_reported() {
        let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert!(apply_dotenv(Err(dotenvy::Error::Io(missing))).is_ok());
        assert!(apply_dotenv(Ok(PathBuf::from(".env"))).is_ok());

        let malformed = apply_dotenv(Err(dotenvy::Error::LineParse("KEY 'oops".into(), 4)));
        assert!(matches!(malformed, Err(SettingsError::DotEnv(_))));

        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(matches!(apply_dotenv(Err(dotenvy::Error::Io(denied))), Err(SettingsError::DotEnv(_))));
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("api/v2/"), "/api/v2");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(load(&[("API_V1_PREFIX", "v1")]).unwrap().api_v1_prefix, "/v1");
    }
}
