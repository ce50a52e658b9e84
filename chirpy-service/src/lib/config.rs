use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub platform: Platform,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
}

/// Deployment platform. Destructive admin endpoints only run on `Dev`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    Prod,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

impl Config {
    /// Load and validate the process configuration.
    ///
    /// Sources, later ones winning:
    /// - `config/default.toml`
    /// - `config/{RUN_MODE}.toml`, only when `RUN_MODE` is set
    /// - environment variables, `__` between section and key
    ///   (`JWT__SECRET`, `POLKA__API_KEY`, `PLATFORM`)
    ///
    /// # Errors
    /// * Any source fails to parse or a section is missing
    /// * `jwt.secret` or `polka.api_key` is blank
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(File::with_name("config/default").required(false));
        if let Ok(run_mode) = env::var("RUN_MODE") {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", run_mode)).required(false));
        }

        let sources = builder
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_sources(sources)
    }

    fn from_sources(sources: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = sources.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        if self.polka.api_key.trim().is_empty() {
            return Err(ConfigError::Message("polka.api_key must be set".to_string()));
        }
        Ok(())
    }
}
