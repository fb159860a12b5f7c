use crate::error::ApiError;
use config::{Config as Cfg, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the invoicing backend including the API prefix,
    /// e.g. `http://localhost:8080/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Page size list screens fall back to when the caller does not pick one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Bearer token attached to every request; requests go out anonymous
    /// when unset.
    #[serde(default)]
    pub auth_token: Option<Secret<String>>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            default_page_size: default_page_size(),
            auth_token: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_settings_default_to_local_backend() {
        let settings = ApiSettings::default();
        assert_eq!(settings.base_url, "http://localhost:8080/api");
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(settings.default_page_size, 10);
        assert!(settings.auth_token.is_none());
    }
}
