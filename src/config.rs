use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ScoringWeights, VerificationStatus};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

/// Where candidate pools are loaded from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Built-in demo data, no database required
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_verification_states")]
    pub verification_states: Vec<VerificationStatus>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            verification_states: default_verification_states(),
        }
    }
}

fn default_verification_states() -> Vec<VerificationStatus> {
    vec![VerificationStatus::Verified, VerificationStatus::Pending]
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_industry_weight")]
    pub industry: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            budget: default_budget_weight(),
            availability: default_availability_weight(),
            industry: default_industry_weight(),
            rating: default_rating_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            skills: config.skills,
            budget: config.budget,
            availability: config.availability,
            industry: config.industry,
            rating: config.rating,
        }
    }
}

fn default_skills_weight() -> f64 { 40.0 }
fn default_budget_weight() -> f64 { 25.0 }
fn default_availability_weight() -> f64 { 15.0 }
fn default_industry_weight() -> f64 { 10.0 }
fn default_rating_weight() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Apply `LOG_LEVEL`/`LOG_FORMAT` overrides on top of the configured values
    pub fn with_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level {
            self.level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok())
    }

    pub fn is_pretty(&self) -> bool {
        self.format == "pretty"
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    Environment::with_prefix("SKILLMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLMATCH__)
    /// 5. DATABASE_URL and JWT_SECRET, shared with the main application
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLMATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_shared_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

/// Pick up the unprefixed variables the main application already defines
fn apply_shared_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_matching_states() {
        let matching = MatchingSettings::default();
        assert_eq!(
            matching.verification_states,
            vec![VerificationStatus::Verified, VerificationStatus::Pending]
        );
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_logging_overrides() {
        let configured = LoggingSettings {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };

        let kept = configured.clone().with_overrides(None, None);
        assert_eq!(kept.level, "debug");
        assert!(kept.is_pretty());

        let overridden = configured.with_overrides(Some("warn".to_string()), Some("json".to_string()));
        assert_eq!(overridden.level, "warn");
        assert!(!overridden.is_pretty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("skillmatch-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[storage]
backend = "memory"

[auth]
jwt_secret = "secret"

[scoring.weights]
industry = 0.0

[logging]
format = "pretty"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.scoring.weights.industry, 0.0);
        assert_eq!(settings.scoring.weights.skills, 40.0);
        assert!(settings.database.url.is_none());
        assert!(settings.logging.is_pretty());
        assert_eq!(settings.logging.level, "info");

        std::fs::remove_dir_all(&dir).ok();
    }
}
