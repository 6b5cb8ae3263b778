//! Transport layer: the seam between [`Request`](super::Request) and the
//! network.
//!
//! The default [`HttpTransport`] is backed by `reqwest`. Anything that
//! implements [`Transport`] can be installed on a client instead, which is
//! how tests observe requests without a server.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use super::codec;
use super::config::ClientConfig;
use crate::{Error, Result};

/// HTTP methods understood by the iugu API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(Error::InvalidInput(format!(
                "Unsupported HTTP method: {}",
                other
            ))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Whether a target is reached over plaintext HTTP or over TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// `http://`
    Plain,
    /// `https://`
    Tls,
}

impl TransportKind {
    /// Select the transport for a URL from its scheme.
    pub fn for_url(url: &Url) -> Self {
        if url.scheme() == "https" {
            TransportKind::Tls
        } else {
            TransportKind::Plain
        }
    }
}

/// A fully prepared request, ready to be written to the network.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Plaintext or TLS, fixed when the URL was set.
    pub kind: TransportKind,
    /// HTTP method
    pub method: Method,
    /// Absolute target URL including the query string
    pub url: Url,
    /// Lower-cased header names and their values
    pub headers: Vec<(String, String)>,
    /// Encoded body, if one was supplied
    pub body: Option<Vec<u8>>,
}

/// A fully received response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase, if known
    pub reason: Option<String>,
    /// The complete response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` if the status is in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Classify the response and decode a success body.
    ///
    /// Non-2xx responses become [`Error::Http`] with the body left
    /// unparsed. Success bodies that are not valid JSON for `T` become
    /// [`Error::Decode`].
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(Error::from_status(
                self.status,
                self.reason.as_deref(),
                self.body,
            ));
        }
        codec::decode_body(&self.body)
    }
}

/// Executes prepared requests.
///
/// Implementations own connection management; a request is executed
/// exactly once and must either yield the whole response or an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and collect its full response.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// The default transport, backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidInput(format!("Invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidInput(format!("Invalid value for header {}", name)))?;
            headers.insert(name, value);
        }

        let mut builder = self
            .http
            .request(request.method.into(), request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(String::from),
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            reason: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_success_boundaries() {
        assert!(response(200, "").is_success());
        assert!(response(299, "").is_success());
        assert!(!response(199, "").is_success());
        assert!(!response(300, "").is_success());
    }

    #[test]
    fn test_success_decodes_json() {
        let value: Value = response(299, r#"{"id":"abc"}"#).into_result().unwrap();
        assert_eq!(value["id"], "abc");
    }

    #[test]
    fn test_failure_is_not_parsed() {
        let err = response(300, r#"{"id":"abc"}"#)
            .into_result::<Value>()
            .unwrap_err();
        assert_eq!(err.status(), Some(300));
        assert_eq!(err.body(), Some(r#"{"id":"abc"}"#));

        let err = response(199, "Not Found").into_result::<Value>().unwrap_err();
        assert_eq!(err.status(), Some(199));
    }

    #[test]
    fn test_success_with_bad_json() {
        let err = response(200, "<html>").into_result::<Value>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_transport_kind_from_scheme() {
        let https = Url::parse("https://api.iugu.com/v1").unwrap();
        let http = Url::parse("http://localhost:8080/v1").unwrap();
        assert_eq!(TransportKind::for_url(&https), TransportKind::Tls);
        assert_eq!(TransportKind::for_url(&http), TransportKind::Plain);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
