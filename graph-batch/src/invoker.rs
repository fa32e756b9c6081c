use crate::catalog::{BatchTemplate, Catalog};
use crate::config::Timeouts;
use crate::errors::{GraphError, Result, TransportError};
use crate::metrics_defs::{BATCH_DURATION, BATCH_FAILURES, BATCH_REQUESTS};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Form field carrying the bearer token.
pub const ACCESS_TOKEN_FIELD: &str = "access_token";
/// Form field carrying the serialized batch template.
pub const BATCH_FIELD: &str = "batch";

/// Transport used to reach the graph API.
///
/// Timeouts and connection handling belong to the implementation; callers
/// only see the response body or a [`TransportError`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POSTs `form` url-encoded to `url` and returns the response body.
    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<Vec<u8>, TransportError>;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(timeouts: &Timeouts) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.http_timeout_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
            .build()?;
        Ok(ReqwestClient { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestClient { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(url.host_str().unwrap_or(url.as_str()).to_string())
                } else {
                    TransportError::ReqwestError(e)
                }
            })?;

        // The API reports batch-level failures (bad token, malformed batch)
        // as a JSON error object. The body is still returned so the caller
        // sees it rejected as a malformed batch.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "graph API returned a non-success status");
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Raw body of a batch call, with the template it was sent for.
#[derive(Debug)]
pub struct BatchResponse<'a> {
    pub template: &'a BatchTemplate,
    pub body: Vec<u8>,
}

/// Sends a catalog template as a single batch call.
pub struct BatchInvoker<C> {
    client: C,
    catalog: Arc<Catalog>,
    endpoint: Url,
}

impl<C: HttpClient> BatchInvoker<C> {
    pub fn new(client: C, catalog: Arc<Catalog>, endpoint: Url) -> Self {
        BatchInvoker {
            client,
            catalog,
            endpoint,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the template registered under `key`, authenticated with `token`.
    ///
    /// Fails before touching the network when the token is empty or the key
    /// is unknown. No retries are attempted.
    pub async fn invoke(&self, token: &str, key: &str) -> Result<BatchResponse<'_>> {
        if token.is_empty() {
            return Err(GraphError::EmptyToken);
        }
        let template = self.catalog.lookup(key)?;
        let batch = template.to_batch_param()?;

        shared::counter!(BATCH_REQUESTS, "query" => key.to_string()).increment(1);
        tracing::debug!(query = key, sub_requests = template.len(), "sending batch request");

        let started = Instant::now();
        let result = self
            .client
            .post_form(
                &self.endpoint,
                &[(ACCESS_TOKEN_FIELD, token), (BATCH_FIELD, batch.as_str())],
            )
            .await;
        shared::histogram!(BATCH_DURATION).record(started.elapsed().as_secs_f64());

        let body = result.map_err(|e| {
            tracing::error!(error = %e, query = key, "batch request failed");
            shared::counter!(BATCH_FAILURES, "reason" => "transport").increment(1);
            GraphError::Transport(e)
        })?;

        Ok(BatchResponse { template, body })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Records every call and answers with a canned result.
    pub(crate) struct MockHttpClient {
        pub calls: AtomicUsize,
        pub forms: Mutex<Vec<Vec<(String, String)>>>,
        response: std::result::Result<Vec<u8>, String>,
    }

    impl MockHttpClient {
        pub fn responding(body: Vec<u8>) -> Self {
            MockHttpClient {
                calls: AtomicUsize::new(0),
                forms: Mutex::new(Vec::new()),
                response: Ok(body),
            }
        }

        pub fn failing(message: &str) -> Self {
            MockHttpClient {
                calls: AtomicUsize::new(0),
                forms: Mutex::new(Vec::new()),
                response: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn post_form(
            &self,
            _url: &Url,
            form: &[(&str, &str)],
        ) -> std::result::Result<Vec<u8>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.forms.lock().unwrap().push(
                form.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
            self.response
                .clone()
                .map_err(TransportError::RequestFailed)
        }
    }

    fn endpoint() -> Url {
        Url::parse("https://graph.example.com").unwrap()
    }

    fn invoker(client: MockHttpClient) -> BatchInvoker<MockHttpClient> {
        BatchInvoker::new(client, Arc::new(Catalog::builtin()), endpoint())
    }

    #[tokio::test]
    async fn test_empty_token_makes_no_call() {
        let invoker = invoker(MockHttpClient::responding(b"[]".to_vec()));
        let result = invoker.invoke("", "full").await;

        assert!(matches!(result, Err(GraphError::EmptyToken)));
        assert_eq!(invoker.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_key_makes_no_call() {
        let invoker = invoker(MockHttpClient::responding(b"[]".to_vec()));
        let result = invoker.invoke("token", "unknown-key").await;

        assert!(matches!(result, Err(GraphError::CatalogKeyNotFound(_))));
        assert_eq!(invoker.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invoke_sends_token_and_batch() {
        let invoker = invoker(MockHttpClient::responding(b"[]".to_vec()));
        let response = invoker.invoke("abc123", "lite").await.unwrap();
        assert_eq!(response.body, b"[]");
        assert_eq!(response.template, invoker.catalog().lookup("lite").unwrap());

        let forms = invoker.client.forms.lock().unwrap();
        assert_eq!(forms.len(), 1);
        let form = &forms[0];
        assert_eq!(form[0], ("access_token".to_string(), "abc123".to_string()));
        assert_eq!(form[1].0, "batch");

        let expected = invoker.catalog().lookup("lite").unwrap().to_batch_param().unwrap();
        assert_eq!(form[1].1, expected);
    }

    #[tokio::test]
    async fn test_transport_error() {
        let invoker = invoker(MockHttpClient::failing("connection refused"));
        let result = invoker.invoke("abc123", "full").await;

        assert!(matches!(
            result,
            Err(GraphError::Transport(TransportError::RequestFailed(msg))) if msg == "connection refused"
        ));
        assert_eq!(invoker.client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reqwest_client_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("access_token=abc123"))
            .and(body_string_contains("batch=%5B%7B%22method%22%3A%22GET%22"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestClient::new(&Timeouts::default()).unwrap();
        let invoker = BatchInvoker::new(
            client,
            Arc::new(Catalog::builtin()),
            Url::parse(&server.uri()).unwrap(),
        );

        let response = invoker.invoke("abc123", "full").await.unwrap();
        assert_eq!(response.body, b"[]");
    }

    #[tokio::test]
    async fn test_reqwest_client_returns_error_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error": {"message": "Invalid OAuth access token."}}"#),
            )
            .mount(&server)
            .await;

        let client = ReqwestClient::new(&Timeouts::default()).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let body = client
            .post_form(&url, &[("access_token", "bad")])
            .await
            .unwrap();
        assert!(body.starts_with(b"{\"error\""));
    }

    #[tokio::test]
    async fn test_reqwest_client_connection_failure() {
        // Bind and drop a listener to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

        let client = ReqwestClient::new(&Timeouts::default()).unwrap();
        let result = client.post_form(&url, &[("access_token", "abc")]).await;
        assert!(result.is_err());
    }
}
