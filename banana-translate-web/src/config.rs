//! Server configuration
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. `configs/<MODE>.{yaml,toml,json}` (optional, `MODE` defaults to `local`)
//! 3. environment variables `BANANA_TRANSLATE__<SECTION>__<KEY>`,
//!    e.g. `BANANA_TRANSLATE__SERVER__PORT=8080`
//!
//! A `.env` file in the working directory is loaded first, so it can set any
//! of the above.

use banana_translate::{
    ConfigError as SimulationError, LoadError, Orchestrator, PhraseTable, SimulationConfig,
    TranslationEngine,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Environment variable selecting the config file
pub const MODE_ENV_VAR: &str = "MODE";
pub const DEFAULT_MODE: &str = "local";
pub const CONFIG_DIR: &str = "configs";
pub const ENV_PREFIX: &str = "BANANA_TRANSLATE";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid simulation settings: {0}")]
    Simulation(#[from] SimulationError),
    #[error("Failed to load phrase table: {0}")]
    Phrases(#[from] LoadError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub failure_rate: f64,
    pub confidence_min: f64,
    pub confidence_max: f64,
    /// Fixed seed for reproducible runs; thread-local randomness when absent
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            failure_rate: SimulationConfig::DEFAULT_FAILURE_RATE,
            confidence_min: SimulationConfig::DEFAULT_CONFIDENCE_MIN,
            confidence_max: SimulationConfig::DEFAULT_CONFIDENCE_MAX,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn to_simulation(&self) -> SimulationConfig {
        SimulationConfig {
            failure_rate: self.failure_rate,
            confidence_min: self.confidence_min,
            confidence_max: self.confidence_max,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub simulation: SimulationSettings,
    /// JSON phrase table replacing the built-in one
    pub phrases_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env`, then the file for `$MODE` under `./configs`, then the environment
    pub fn load() -> Result<Self, StartupError> {
        dotenvy::dotenv().ok();
        let mode = std::env::var(MODE_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODE.to_string());
        info!("Configuration mode: {}", mode);
        Self::load_from(Path::new(CONFIG_DIR), &mode)
    }

    /// Load `<dir>/<mode>.*` (if present) with environment overrides on top
    pub fn load_from(dir: &Path, mode: &str) -> Result<Self, StartupError> {
        let settings = Config::builder()
            .add_source(File::with_name(&dir.join(mode).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// `host:port` to listen on; the host may be a name or an IP address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the orchestrator described by this configuration
    pub fn build_orchestrator(&self) -> Result<Orchestrator, StartupError> {
        let mut engine = TranslationEngine::default();
        if let Some(path) = &self.phrases_path {
            let phrases = PhraseTable::from_json_file(path)?;
            info!("Loaded {} phrases from {}", phrases.len(), path.display());
            engine = engine.with_phrases(phrases);
        }

        let mut builder = Orchestrator::builder()
            .engine(engine)
            .simulation(self.simulation.to_simulation());
        if let Some(seed) = self.simulation.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banana_translate::TranslateRequestBody;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), "missing").unwrap();
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.simulation, SimulationSettings::default());
        assert_eq!(config.phrases_path, None);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "server:\n  host: 0.0.0.0\n  port: 8088\nsimulation:\n  failure_rate: 0.0\n  seed: 42\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "staging").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.bind_address(), "0.0.0.0:8088");
        assert_eq!(config.simulation.failure_rate, 0.0);
        assert_eq!(config.simulation.seed, Some(42));
        // Unset keys keep their defaults
        assert_eq!(config.simulation.confidence_min, 0.95);
    }

    #[test]
    fn test_build_orchestrator_validates_simulation() {
        let config = AppConfig {
            simulation: SimulationSettings {
                failure_rate: 1.5,
                ..SimulationSettings::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.build_orchestrator(),
            Err(StartupError::Simulation(_))
        ));
    }

    #[test]
    fn test_build_orchestrator_with_phrase_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrases.json");
        fs::write(
            &path,
            r#"{"@metadata": {"authors": ["demo"]}, "en": {"fr": "Bonjour le monde"}}"#,
        )
        .unwrap();

        let config = AppConfig {
            simulation: SimulationSettings {
                failure_rate: 0.0,
                ..SimulationSettings::default()
            },
            phrases_path: Some(path),
            ..AppConfig::default()
        };
        let orchestrator = config.build_orchestrator().unwrap();
        let result = orchestrator
            .handle(TranslateRequestBody::new("Hello", "en", "fr"))
            .unwrap();
        assert_eq!(result.translated_text, "Bonjour le monde (Hello...)");

        // Pairs missing from the custom table fall back to the label
        let result = orchestrator
            .handle(TranslateRequestBody::new("Hello", "en", "vi"))
            .unwrap();
        assert_eq!(result.translated_text, "Bản dịch tiếng Việt: Hello");
    }

    #[test]
    fn test_shipped_config_files() {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/configs"));
        let mut config = AppConfig::load_from(dir, DEFAULT_MODE).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.simulation, SimulationSettings::default());
        assert_eq!(config.phrases_path, None);

        config.simulation.failure_rate = 0.0;
        config.phrases_path = Some(dir.join("phrases.json"));
        let orchestrator = config.build_orchestrator().unwrap();
        let result = orchestrator
            .handle(TranslateRequestBody::new("Hello", "en", "it"))
            .unwrap();
        assert_eq!(
            result.translated_text,
            "Ciao, questa è una traduzione italiana (Hello...)"
        );
    }

    #[test]
    fn test_missing_phrase_file_fails_startup() {
        let config = AppConfig {
            phrases_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.build_orchestrator(),
            Err(StartupError::Phrases(_))
        ));
    }
}
