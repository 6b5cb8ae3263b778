//! Client configuration options and credentials.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{Error, Result};

/// Default iugu API root.
pub const DEFAULT_BASE_URL: &str = "https://api.iugu.com/v1";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "IUGU_TOKEN";

/// Environment variable holding the account ID.
pub const ACCOUNT_ID_ENV_VAR: &str = "IUGU_ACCOUNTID";

/// Configuration for the iugu client.
///
/// # Example
///
/// ```
/// use iugu_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-shop/1.0");
/// assert_eq!(config.base_url.as_str(), "https://api.iugu.com/v1");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root every endpoint is appended to
    pub base_url: Url,
    /// Request timeout, enforced by the transport
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            user_agent: format!("iugu-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another API root (a mock server, a proxy).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if `base_url` is not an absolute URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(self)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The absolute URL for an endpoint path such as `/customers`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint)
    }
}

/// The API token and optional account ID used to authenticate.
///
/// The token is kept in a [`SecretString`] and is never shown by `Debug`.
#[derive(Clone)]
pub struct Credentials {
    api_token: SecretString,
    account_id: Option<String>,
}

impl Credentials {
    /// Credentials from an API token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(token_missing());
        }
        Ok(Self {
            api_token: SecretString::from(api_token),
            account_id: None,
        })
    }

    /// Attach an account ID, needed to create payment tokens.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        self.account_id = (!account_id.is_empty()).then_some(account_id);
        self
    }

    /// Resolve credentials from explicit values, falling back to variables
    /// fetched through `lookup`.
    ///
    /// The token comes from `api_token` or else from [`TOKEN_ENV_VAR`]; the
    /// account ID from `account_id` or else from [`ACCOUNT_ID_ENV_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no token can be found.
    ///
    /// # Example
    ///
    /// ```
    /// use iugu_rs::Credentials;
    ///
    /// let creds = Credentials::resolve(None, None, |name| match name {
    ///     "IUGU_TOKEN" => Some("token123".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert!(creds.account_id().is_none());
    ///
    /// let missing = Credentials::resolve(None, None, |_| None);
    /// assert!(missing.is_err());
    /// ```
    pub fn resolve<F>(
        api_token: Option<String>,
        account_id: Option<String>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = api_token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup(TOKEN_ENV_VAR))
            .ok_or_else(token_missing)?;

        let credentials = Self::new(api_token)?;
        match account_id
            .filter(|a| !a.is_empty())
            .or_else(|| lookup(ACCOUNT_ID_ENV_VAR))
        {
            Some(account_id) => Ok(credentials.with_account_id(account_id)),
            None => Ok(credentials),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `IUGU_TOKEN` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None, |name| std::env::var(name).ok())
    }

    /// The API token.
    pub fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// The account ID, if any.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

fn token_missing() -> Error {
    Error::Config("API token not specified".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("iugu-rs/"));
    }

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint_url("/customers/42"),
            "https://api.iugu.com/v1/customers/42"
        );

        let local = ClientConfig::new()
            .with_base_url("http://127.0.0.1:8080/v1/")
            .unwrap();
        assert_eq!(local.endpoint_url("/plans"), "http://127.0.0.1:8080/v1/plans");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ClientConfig::new().with_base_url("api.iugu.com").is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = Credentials::new("").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_resolve_prefers_arguments() {
        let creds = Credentials::resolve(
            Some("explicit".to_string()),
            Some("acc-1".to_string()),
            |_| Some("from-env".to_string()),
        )
        .unwrap();
        assert_eq!(creds.api_token(), "explicit");
        assert_eq!(creds.account_id(), Some("acc-1"));
    }

    #[test]
    fn test_resolve_falls_back_to_lookup() {
        let creds = Credentials::resolve(None, None, |name| match name {
            TOKEN_ENV_VAR => Some("env-token".to_string()),
            ACCOUNT_ID_ENV_VAR => Some("env-account".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.api_token(), "env-token");
        assert_eq!(creds.account_id(), Some("env-account"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let err = Credentials::resolve(None, Some("acc".to_string()), |_| None).unwrap_err();
        match err {
            Error::Config(msg) => assert_eq!(msg, "API token not specified"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = Credentials::new("super-secret").unwrap();
        assert!(!format!("{:?}", creds).contains("super-secret"));
    }
}
