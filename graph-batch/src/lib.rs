//! Batch profile fetching for a social-graph API.
//!
//! A profile is assembled from one batched HTTP call: a predefined template
//! of sub-requests is sent in a single form POST, and the positional array
//! that comes back is reconciled into a [`Profile`]. Sub-requests succeed or
//! fail independently; only transport failures and unreadable batch
//! responses fail the whole request.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod invoker;
pub mod metrics_defs;
pub mod profile;
pub mod reconciler;
pub mod schema;
pub mod value;

#[cfg(test)]
mod testutils;

pub use auth::{OAuthConfig, StaticToken, TokenProvider};
pub use catalog::{BatchTemplate, Catalog, ResultLimits, Slot, SlotKind, SubRequest};
pub use config::Config;
pub use errors::{DecodeError, GraphError, Result, TransportError};
pub use invoker::{BatchInvoker, BatchResponse, HttpClient, ReqwestClient};
pub use profile::{Diagnostic, DiagnosticKind, Profile};
pub use reconciler::reconcile;

use metrics_defs::BATCH_FAILURES;
use std::sync::Arc;
use url::Url;

/// Fetches profiles: one batch call plus reconciliation per request.
pub struct GraphClient<C = ReqwestClient> {
    invoker: BatchInvoker<C>,
}

impl GraphClient<ReqwestClient> {
    /// Builds a client with a `reqwest` transport from `config`.
    ///
    /// The config is expected to be validated already.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = ReqwestClient::new(&config.timeouts)?;
        Ok(Self::with_http_client(
            client,
            Arc::new(config.catalog()),
            config.endpoint.clone(),
        ))
    }
}

impl<C: HttpClient> GraphClient<C> {
    pub fn with_http_client(client: C, catalog: Arc<Catalog>, endpoint: Url) -> Self {
        GraphClient {
            invoker: BatchInvoker::new(client, catalog, endpoint),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.invoker.catalog()
    }

    /// Runs the query registered under `query` with `token`.
    ///
    /// The returned profile may be partially populated; see
    /// [`Profile::diagnostics`] for what was left out and why.
    pub async fn request(&self, token: &str, query: &str) -> Result<Profile> {
        let response = self.invoker.invoke(token, query).await?;

        let mut profile = reconcile(response.template, &response.body).inspect_err(|_| {
            shared::counter!(BATCH_FAILURES, "reason" => "malformed").increment(1);
        })?;
        profile.token = token.to_string();

        tracing::info!(
            query,
            id = %profile.id,
            populated = ?profile.populated_slots(),
            diagnostics = profile.diagnostics.len(),
            "profile fetched"
        );

        Ok(profile)
    }

    /// Like [`GraphClient::request`], with the token taken from `tokens`.
    pub async fn request_with(&self, tokens: &dyn TokenProvider, query: &str) -> Result<Profile> {
        let token = tokens.access_token();
        self.request(&token, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::tests::MockHttpClient;
    use crate::testutils::{failed, profile_elements, to_bytes};
    use std::sync::atomic::Ordering;

    fn client(mock: MockHttpClient) -> GraphClient<MockHttpClient> {
        GraphClient::with_http_client(
            mock,
            Arc::new(Catalog::builtin()),
            Url::parse("https://graph.example.com").unwrap(),
        )
    }

    fn calls(client: &GraphClient<MockHttpClient>) -> usize {
        client.invoker.client().calls.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_empty_token() {
        let client = client(MockHttpClient::responding(to_bytes(&profile_elements())));
        let result = client.request("", Catalog::FULL).await;

        assert!(matches!(result, Err(GraphError::EmptyToken)));
        assert_eq!(calls(&client), 0);
    }

    #[tokio::test]
    async fn test_unknown_query() {
        let client = client(MockHttpClient::responding(to_bytes(&profile_elements())));
        let result = client.request("token", "nope").await;

        assert!(matches!(result, Err(GraphError::CatalogKeyNotFound(key)) if key == "nope"));
        assert_eq!(calls(&client), 0);
    }

    #[tokio::test]
    async fn test_full_profile() {
        let client = client(MockHttpClient::responding(to_bytes(&profile_elements())));
        let profile = client.request("abc123", Catalog::FULL).await.unwrap();

        assert_eq!(profile.id, "100001");
        assert_eq!(profile.token, "abc123");
        assert_eq!(
            profile.populated_slots(),
            vec!["me", "friends", "likes", "feed", "home", "photos", "videos"]
        );
        assert!(profile.diagnostics.is_empty());
        assert_eq!(calls(&client), 1);
    }

    #[tokio::test]
    async fn test_partial_profile() {
        let mut elements = profile_elements();
        elements[3] = failed(400);
        elements[8] = serde_json::Value::Null;

        let client = client(MockHttpClient::responding(to_bytes(&elements)));
        let profile = client.request("abc123", Catalog::LITE).await.unwrap();

        assert!(profile.friends.is_none());
        assert!(profile.videos.is_none());
        assert!(profile.me.is_some());
        assert!(profile.photos.is_some());
        let positions: Vec<usize> = profile.diagnostics.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![3, 8]);
    }

    #[tokio::test]
    async fn test_malformed_batch() {
        let body = br#"{"error": {"message": "Invalid OAuth access token."}}"#.to_vec();
        let client = client(MockHttpClient::responding(body));
        let result = client.request("abc123", Catalog::FULL).await;

        assert!(matches!(result, Err(GraphError::MalformedBatch(_))));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = client(MockHttpClient::failing("connection reset"));
        let result = client.request("abc123", Catalog::FULL).await;

        assert!(matches!(result, Err(GraphError::Transport(_))));
    }

    #[tokio::test]
    async fn test_request_with_token_provider() {
        let client = client(MockHttpClient::responding(to_bytes(&profile_elements())));
        let profile = client
            .request_with(&StaticToken::new("from-provider"), Catalog::FULL)
            .await
            .unwrap();
        assert_eq!(profile.token, "from-provider");

        let forms = client.invoker.client().forms.lock().unwrap();
        assert_eq!(forms[0][0].1, "from-provider");
    }
}
