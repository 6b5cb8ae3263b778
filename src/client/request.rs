//! A single HTTP transaction against the iugu API.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use super::codec;
use super::transport::{Method, Transport, TransportKind, TransportRequest};
use crate::{Error, Result};

/// Options accepted by [`Request::new`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL
    pub url: Option<String>,
    /// Extra headers, applied before the URL
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options for the given method with no URL and no extra headers.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            url: None,
            headers: Vec::new(),
        }
    }

    /// Set the target URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.headers.push((key.into(), value.to_string()));
        self
    }
}

/// The resolved destination of a request.
#[derive(Debug, Clone)]
struct Target {
    url: Url,
    kind: TransportKind,
}

/// One HTTP request: method, target, headers and a single `begin`.
///
/// Header names are stored lower-cased, so lookups are case-insensitive and
/// the last write wins. `content-type` and `accept` are preset to
/// `application/json`.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::client::Method;
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let mut request = client.make_request(Method::Get, "/customers/ABC", None);
/// request.set_header("X-Trace", "1");
/// assert_eq!(request.header("x-trace"), Some("1"));
///
/// let customer: serde_json::Value = request.begin().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Request {
    method: Method,
    target: Option<Target>,
    url_error: Option<url::ParseError>,
    headers: BTreeMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl Request {
    /// Create a request, applying the given headers and then the URL.
    ///
    /// Construction never fails. If `options.url` is not a valid absolute
    /// URL, the parse error is kept and returned by `begin`.
    pub fn new(transport: Arc<dyn Transport>, options: RequestOptions) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("accept".to_string(), "application/json".to_string());

        let mut request = Self {
            method: options.method,
            target: None,
            url_error: None,
            headers,
            transport,
        };

        request.set_headers(options.headers);
        if let Some(url) = options.url {
            match Url::parse(&url) {
                Ok(url) => request.set_target(url),
                Err(e) => request.url_error = Some(e),
            }
        }

        request
    }

    /// Replace the target URL.
    ///
    /// The transport kind (plaintext or TLS) is chosen here from the URL
    /// scheme.
    pub fn set_url(&mut self, url: &str) -> Result<()> {
        self.set_target(Url::parse(url)?);
        Ok(())
    }

    fn set_target(&mut self, url: Url) {
        let kind = TransportKind::for_url(&url);
        self.target = Some(Target { url, kind });
        self.url_error = None;
    }

    /// The target URL, or the reason there is none.
    pub(crate) fn require_url(&self) -> Result<&Url> {
        if let Some(e) = self.url_error {
            return Err(Error::UrlParse(e));
        }
        self.url()
            .ok_or_else(|| Error::InvalidInput("Request URL not set".to_string()))
    }

    /// Set a header, replacing any value stored under the same name in any
    /// casing.
    pub fn set_header(&mut self, key: &str, value: impl Into<String>) {
        self.headers.insert(key.to_lowercase(), value.into());
    }

    /// Set every header in `headers`.
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        for (key, value) in headers {
            self.set_header(key.as_ref(), value.to_string());
        }
    }

    /// Remove a header. Returns the previous value.
    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        self.headers.remove(&key.to_lowercase())
    }

    /// Look up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// All headers, with lower-cased names, in name order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The current target URL, if one was set.
    pub fn url(&self) -> Option<&Url> {
        self.target.as_ref().map(|t| &t.url)
    }

    /// The transport selected by the last [`set_url`](Self::set_url).
    pub fn transport_kind(&self) -> Option<TransportKind> {
        self.target.as_ref().map(|t| t.kind)
    }

    /// Send the request without a body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the connection fails
    /// - [`Error::Http`] if the status is outside `200..=299`
    /// - [`Error::Decode`] if the success body is not valid JSON for `T`
    pub async fn begin<T: DeserializeOwned>(self) -> Result<T> {
        self.dispatch(None).await
    }

    /// Send the request with `body` encoded as JSON and decode the JSON
    /// response.
    ///
    /// The body is always sent when given here, even if it encodes to
    /// `0`, `""` or `false`.
    pub async fn begin_with<B, T>(mut self, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let data = codec::encode_body(body)?;
        self.set_header("content-length", data.len().to_string());
        self.dispatch(Some(data)).await
    }

    async fn dispatch<T: DeserializeOwned>(self, body: Option<Vec<u8>>) -> Result<T> {
        self.require_url()?;
        let Target { url, kind } = self
            .target
            .ok_or_else(|| Error::InvalidInput("Request URL not set".to_string()))?;

        tracing::debug!(method = %self.method, %url, ?kind, "sending request");

        let request = TransportRequest {
            kind,
            method: self.method,
            url,
            headers: self.headers.into_iter().collect(),
            body,
        };

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            tracing::warn!(
                method = %self.method,
                status = response.status,
                "request failed"
            );
        }
        response.into_result()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let v = if k == "authorization" { "[REDACTED]" } else { v.as_str() };
                (k.as_str(), v)
            })
            .collect();

        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url().map(Url::as_str))
            .field("headers", &headers)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::transport::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response.
    pub(crate) struct RecordingTransport {
        pub(crate) requests: Mutex<Vec<TransportRequest>>,
        status: u16,
        body: String,
    }

    impl RecordingTransport {
        pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                status,
                body: body.to_string(),
            })
        }

        pub(crate) fn last(&self) -> TransportRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(TransportResponse {
                status: self.status,
                reason: Some("Canned".to_string()),
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    fn request(transport: Arc<RecordingTransport>, url: &str) -> Request {
        Request::new(transport, RequestOptions::new(Method::Get).with_url(url))
    }

    #[test]
    fn test_default_headers() {
        let req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("ACCEPT"), Some("application/json"));
    }

    #[test]
    fn test_header_case_insensitive() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        req.set_header("X-Custom", "one");
        req.set_header("x-CUSTOM", "two");
        assert_eq!(req.header("x-custom"), Some("two"));
        assert_eq!(req.header("X-Custom"), Some("two"));
        assert_eq!(req.headers().filter(|(k, _)| *k == "x-custom").count(), 1);
    }

    #[test]
    fn test_set_header_idempotent() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        req.set_header("Authorization", "Basic abc");
        let before: Vec<(String, String)> = req
            .headers()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        req.set_header("AUTHORIZATION", "Basic abc");
        let after: Vec<(String, String)> = req
            .headers()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_options_headers_and_override() {
        let options = RequestOptions::new(Method::Post)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Retries", 3);
        let req = Request::new(RecordingTransport::new(200, "{}"), options);
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("x-retries"), Some("3"));
        assert!(req.url().is_none());
        assert!(req.transport_kind().is_none());
    }

    #[test]
    fn test_header_unset() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        assert_eq!(req.header("x-missing"), None);
        assert_eq!(req.remove_header("Accept"), Some("application/json".to_string()));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_set_url_selects_transport() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        assert_eq!(req.transport_kind(), Some(TransportKind::Tls));
        req.set_url("http://localhost:3000/v1/plans").unwrap();
        assert_eq!(req.transport_kind(), Some(TransportKind::Plain));
        assert_eq!(req.url().unwrap().path(), "/v1/plans");
    }

    #[test]
    fn test_set_url_invalid() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        let err = req.set_url("not a url").unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
        assert_eq!(req.url().unwrap().as_str(), "https://api.iugu.com/v1/");
    }

    #[tokio::test]
    async fn test_invalid_url_reported_by_begin() {
        let transport = RecordingTransport::new(200, "{}");
        let options = RequestOptions::new(Method::Get).with_url("/relative");
        let req = Request::new(transport.clone(), options);
        assert!(req.url().is_none());

        let err = req.begin::<serde_json::Value>().await.unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_url_clears_invalid_url() {
        let transport = RecordingTransport::new(200, "{}");
        let options = RequestOptions::new(Method::Get).with_url("not a url");
        let mut req = Request::new(transport.clone(), options);
        req.set_url("https://api.iugu.com/v1/plans").unwrap();

        let _: serde_json::Value = req.begin().await.unwrap();
        assert_eq!(transport.last().url.path(), "/v1/plans");
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let mut req = request(RecordingTransport::new(200, "{}"), "https://api.iugu.com/v1/");
        req.set_header("Authorization", "Basic c2VjcmV0Og==");
        let debug = format!("{:?}", req);
        assert!(!debug.contains("c2VjcmV0Og=="));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_begin_without_body() {
        let transport = RecordingTransport::new(200, r#"{"ok":true}"#);
        let req = request(transport.clone(), "https://api.iugu.com/v1/customers");
        let value: serde_json::Value = req.begin().await.unwrap();
        assert_eq!(value["ok"], true);

        let sent = transport.last();
        assert!(sent.body.is_none());
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.kind, TransportKind::Tls);
        assert!(!sent.headers.iter().any(|(k, _)| k == "content-length"));
    }

    #[tokio::test]
    async fn test_begin_with_body_sets_length() {
        let transport = RecordingTransport::new(201, "{}");
        let req = request(transport.clone(), "http://localhost/v1/customers");
        let _: serde_json::Value = req.begin_with(&serde_json::json!({"name": "Ana"})).await.unwrap();

        let sent = transport.last();
        let body = sent.body.unwrap();
        assert_eq!(body, br#"{"name":"Ana"}"#);
        assert!(sent
            .headers
            .iter()
            .any(|(k, v)| k == "content-length" && *v == body.len().to_string()));
        assert_eq!(sent.kind, TransportKind::Plain);
    }

    #[tokio::test]
    async fn test_falsy_body_is_sent() {
        let transport = RecordingTransport::new(200, "null");
        let req = request(transport.clone(), "http://localhost/v1/x");
        let _: () = req.begin_with(&0).await.unwrap();
        assert_eq!(transport.last().body.unwrap(), b"0");
    }

    #[tokio::test]
    async fn test_begin_without_url() {
        let transport = RecordingTransport::new(200, "{}");
        let req = Request::new(transport.clone(), RequestOptions::new(Method::Get));
        let err = req.begin::<serde_json::Value>().await.unwrap_err();
        assert!(err.is_validation_error());
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_body_preserved() {
        let transport = RecordingTransport::new(404, "Not Found");
        let req = request(transport, "https://api.iugu.com/v1/customers/none");
        let err = req.begin::<serde_json::Value>().await.unwrap_err();
        match err {
            Error::Http {
                status,
                message,
                str_body,
                ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Canned");
                assert_eq!(str_body, "Not Found");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }
}
