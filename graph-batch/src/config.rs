use crate::auth::OAuthConfig;
use crate::catalog::{Catalog, ResultLimits};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://graph.facebook.com";

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("HTTP timeout cannot be 0")]
    InvalidTimeout,

    #[error("endpoint must use http or https: {0}")]
    InvalidEndpointScheme(String),

    #[error("preset name cannot be empty")]
    EmptyPresetName,

    #[error("preset {0} would replace a built-in preset")]
    BuiltinPresetOverride(String),

    #[error("OAuth {0} cannot be empty")]
    EmptyOAuthField(&'static str),
}

/// Graph API client configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Batch endpoint the form is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    #[serde(default)]
    pub timeouts: Timeouts,
    /// Settings for the authorization-code flow. Only needed to build the
    /// login redirect; requests themselves take a ready-made token.
    pub oauth: Option<OAuthConfig>,
    /// Extra query presets, keyed by name, on top of `full` and `lite`
    #[serde(default)]
    pub presets: HashMap<String, ResultLimits>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: default_endpoint(),
            timeouts: Timeouts::default(),
            oauth: None,
            presets: HashMap::new(),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timeouts.validate()?;

        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidEndpointScheme(
                self.endpoint.to_string(),
            ));
        }

        for name in self.presets.keys() {
            if name.is_empty() {
                return Err(ValidationError::EmptyPresetName);
            }
            if name == Catalog::FULL || name == Catalog::LITE {
                return Err(ValidationError::BuiltinPresetOverride(name.clone()));
            }
        }

        if let Some(oauth) = &self.oauth {
            oauth.validate()?;
        }

        Ok(())
    }

    /// Builds the catalog: built-in presets plus the configured ones.
    pub fn catalog(&self) -> Catalog {
        self.presets
            .iter()
            .fold(Catalog::builtin(), |catalog, (name, limits)| {
                catalog.with_preset(name.clone(), *limits)
            })
    }
}

/// Timeouts applied by the HTTP transport
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Timeouts {
    /// Whole request/response cycle, including reading the body
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            http_timeout_secs: default_http_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Timeouts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.http_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let yaml = r#"
endpoint: "https://graph.example.com/"
timeouts:
    http_timeout_secs: 10
oauth:
    client_id: "1234"
    client_secret: "s3cret"
    auth_url: "https://www.example.com/dialog/oauth"
    token_url: "https://graph.example.com/oauth/access_token"
    redirect_url: "https://app.example.com/callback"
    scope: "email,user_likes"
presets:
    medium:
        likes: 5
        friends: 100
        feed: 5
        home: 5
        photos: 5
        videos: 5
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.endpoint.as_str(), "https://graph.example.com/");
        assert_eq!(config.timeouts.http_timeout_secs, 10);
        assert_eq!(config.timeouts.connect_timeout_secs, 5);
        assert_eq!(config.presets["medium"].friends, 100);
        assert_eq!(config.catalog().keys(), vec!["full", "lite", "medium"]);
    }

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint.as_str(), "https://graph.facebook.com/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.timeouts.http_timeout_secs = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidTimeout
        ));

        let mut config = Config::default();
        config.endpoint = Url::parse("ftp://graph.example.com").unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidEndpointScheme(_)
        ));

        let mut config = Config::default();
        config
            .presets
            .insert("full".to_string(), ResultLimits::LITE);
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::BuiltinPresetOverride(_)
        ));

        let mut config = Config::default();
        config.presets.insert(String::new(), ResultLimits::LITE);
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptyPresetName
        ));
    }

    #[test]
    fn test_deserialization_errors() {
        assert!(serde_yaml::from_str::<Config>(r#"endpoint: "not a url""#).is_err());
        assert!(
            serde_yaml::from_str::<Config>(
                r#"
presets:
    medium: {likes: 5}
"#
            )
            .is_err()
        );
    }
}
