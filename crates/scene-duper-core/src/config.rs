use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9999/graphql";
pub const DEFAULT_FINGERPRINT_TYPE: &str = "SHA-256";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// GraphQL endpoint of the catalog server.
    pub endpoint: String,
    /// Sent as the `ApiKey` header when present.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Fingerprint type compared by the content index.
    pub fingerprint_type: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            fingerprint_type: DEFAULT_FINGERPRINT_TYPE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("endpoint must not be empty".to_string()));
        }
        if self.fingerprint_type.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "fingerprint_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy suitable for printing, with the api key masked.
    pub fn redacted(&self) -> AppConfig {
        AppConfig {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

/// Defaults, then `Config.toml` if present, then `SCENE_DUPER_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, Error> {
    load_from("Config")
}

pub fn load_from(file_stem: &str) -> Result<AppConfig, Error> {
    let config = build(file_stem)?.try_deserialize::<AppConfig>()?;
    config.validate()?;
    Ok(config)
}

fn build(file_stem: &str) -> Result<Config, ConfigError> {
    Config::builder()
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("fingerprint_type", DEFAULT_FINGERPRINT_TYPE)?
        .add_source(ConfigFile::with_name(file_stem).required(false))
        .add_source(Environment::with_prefix("SCENE_DUPER"))
        .build()
}
