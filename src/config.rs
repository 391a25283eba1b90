// src/config.rs
use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::services::{completion::CompletionSettings, prompt::Persona};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATABASE: &str = "AttendanceDatabase";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Connection string; `None` leaves the store unavailable.
    pub url: Option<String>,
    pub database: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub static_dir: PathBuf,
    pub store: StoreSettings,
    pub completion: CompletionSettings,
    pub persona: Persona,
    pub consult_model_without_deduction: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let completion_defaults = CompletionSettings::default();
        let persona_defaults = Persona::default();

        Ok(Self {
            port: parsed(&get, "PORT", DEFAULT_PORT)?,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("client/build")),
            store: StoreSettings {
                url: get("MONGO_URL"),
                database: get("MONGO_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                timeout: Duration::from_secs(parsed(&get, "STORE_TIMEOUT_SECS", 5)?),
            },
            completion: CompletionSettings {
                base_url: get("OPENAI_BASE_URL").unwrap_or(completion_defaults.base_url),
                api_key: get("OPENAI_API_KEY"),
                model: get("OPENAI_MODEL").unwrap_or(completion_defaults.model),
                max_tokens: parsed(&get, "COMPLETION_MAX_TOKENS", completion_defaults.max_tokens)?,
                temperature: parsed(&get, "COMPLETION_TEMPERATURE", completion_defaults.temperature)?,
                timeout: Duration::from_secs(parsed(
                    &get,
                    "COMPLETION_TIMEOUT_SECS",
                    completion_defaults.timeout.as_secs(),
                )?),
            },
            persona: Persona {
                assistant_name: get("ASSISTANT_NAME").unwrap_or(persona_defaults.assistant_name),
                organization: get("ORGANIZATION_NAME").unwrap_or(persona_defaults.organization),
            },
            consult_model_without_deduction: flag(&get, "CONSULT_MODEL_WITHOUT_DEDUCTION", false)?,
        })
    }
}

fn parsed<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn flag(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = get(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.static_dir, PathBuf::from("client/build"));
        assert_eq!(cfg.store.url, None);
        assert_eq!(cfg.store.database, "AttendanceDatabase");
        assert_eq!(cfg.store.timeout, Duration::from_secs(5));
        assert_eq!(cfg.completion.api_key, None);
        assert_eq!(cfg.completion.max_tokens, 600);
        assert!((cfg.completion.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(cfg.completion.timeout, Duration::from_secs(30));
        assert_eq!(cfg.persona, Persona::default());
        assert!(!cfg.consult_model_without_deduction);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("PORT", "8080"),
            ("MONGO_URL", "mongodb://db:27017"),
            ("MONGO_DB", "Payroll"),
            ("STORE_TIMEOUT_SECS", "2"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("COMPLETION_TEMPERATURE", "0.2"),
            ("ASSISTANT_NAME", "Ada"),
            ("CONSULT_MODEL_WITHOUT_DEDUCTION", "yes"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.store.url.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(cfg.store.database, "Payroll");
        assert_eq!(cfg.store.timeout, Duration::from_secs(2));
        assert_eq!(cfg.completion.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.completion.model, "gpt-4o");
        assert_eq!(cfg.persona.assistant_name, "Ada");
        assert_eq!(cfg.persona.organization, "Jawwal");
        assert!(cfg.consult_model_without_deduction);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = config_from(&[("MONGO_URL", ""), ("PORT", "  ")]).unwrap();
        assert_eq!(cfg.store.url, None);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[("CONSULT_MODEL_WITHOUT_DEDUCTION", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CONSULT_MODEL_WITHOUT_DEDUCTION", .. }));
    }
}
