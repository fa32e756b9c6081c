//! Credentials at the boundary of the OAuth2 flow.
//!
//! The authorization-code exchange happens elsewhere. This module holds the
//! client settings needed to send a user to the login dialog and the trait
//! through which a finished token reaches the client.

use crate::config::ValidationError;
use serde::Deserialize;
use url::Url;

/// OAuth2 client settings for the graph API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub redirect_url: Url,
    /// Comma separated permission list
    #[serde(default)]
    pub scope: String,
}

impl OAuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::EmptyOAuthField("client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(ValidationError::EmptyOAuthField("client_secret"));
        }
        Ok(())
    }

    /// URL of the login dialog that starts the authorization-code flow.
    ///
    /// `state` is echoed back on the redirect and should be unguessable.
    pub fn authorize_url(&self, state: &str) -> Url {
        let mut url = self.auth_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", self.redirect_url.as_str())
                .append_pair("response_type", "code")
                .append_pair("state", state);
            if !self.scope.is_empty() {
                query.append_pair("scope", &self.scope);
            }
        }
        url
    }
}

/// Supplies the bearer token for a request.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> String;
}

/// A token obtained up front, e.g. from a stored session.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}
