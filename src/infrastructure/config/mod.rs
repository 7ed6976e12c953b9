use crate::domain::error::{AppError, Result};
use crate::domain::session::SessionContext;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const CONFIG_FILE: &str = "sheetsift.toml";
const ENV_PREFIX: &str = "SHEETSIFT_";

#[derive(Debug, Deserialize)]
struct RawConfig {
    upload_url: String,
    data_url: String,
    #[serde(default = "default_upload_timeout_secs")]
    upload_timeout_secs: u64,
    #[serde(default)]
    api_token: Option<String>,
}

fn default_upload_timeout_secs() -> u64 {
    60
}

/// Endpoint and session settings, merged from `sheetsift.toml` and
/// `SHEETSIFT_`-prefixed environment variables (env wins).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upload_url: Url,
    pub data_url: Url,
    pub upload_timeout_secs: u64,
    pub api_token: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let raw: RawConfig = figment
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            upload_url: parse_url("upload_url", &raw.upload_url)?,
            data_url: parse_url("data_url", &raw.data_url)?,
            upload_timeout_secs: raw.upload_timeout_secs,
            api_token: raw.api_token,
        })
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    /// The explicit session handed to the remote components.
    pub fn session(&self) -> SessionContext {
        match &self.api_token {
            Some(token) => SessionContext::with_token(token.clone()),
            None => SessionContext::anonymous(),
        }
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| AppError::Config(format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            upload_url = "https://example.com/webhook/excel"
            data_url = "https://example.com/api/data"
            "#,
        ));
        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.upload_timeout_secs, 60);
        assert!(config.api_token.is_none());
        assert!(config.session().token.is_none());
    }

    #[test]
    fn test_token_and_timeout_override() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            upload_url = "https://example.com/webhook/excel"
            data_url = "https://example.com/api/data"
            upload_timeout_secs = 5
            api_token = "secret"
            "#,
        ));
        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.upload_timeout(), Duration::from_secs(5));
        assert_eq!(config.session().token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_url_is_a_config_error() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            upload_url = "not a url"
            data_url = "https://example.com/api/data"
            "#,
        ));
        let err = AppConfig::from_figment(figment).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_endpoint_is_a_config_error() {
        let figment = Figment::new().merge(Toml::string(r#"data_url = "https://x.test/""#));
        assert!(AppConfig::from_figment(figment).is_err());
    }
}
