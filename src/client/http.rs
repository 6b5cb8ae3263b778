//! The iugu client facade.

use std::sync::{Arc, OnceLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::RwLock;

use crate::api::{
    CustomersService, HooksService, PaymentTokensService, PlansService, SubscriptionsService,
};
use crate::Result;

use super::config::{ClientConfig, Credentials};
use super::paginated::PagedRequest;
use super::request::{Request, RequestOptions};
use super::transport::{HttpTransport, Method, Transport};

/// The main client for the iugu API.
///
/// Every request made through the client carries a Basic `Authorization`
/// header built from the API token. Resource services are created on first
/// use and shared by all clones of the client.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::IuguClient;
/// use iugu_rs::models::Customer;
///
/// # async fn example() -> iugu_rs::Result<()> {
/// let client = IuguClient::new("your-api-token")?;
///
/// let created: Customer = client
///     .customers()
///     .create(&Customer::new("Ana Souza", "ana@example.com"))
///     .await?;
///
/// let plans = client.plans().list().request_page().await?;
/// println!("{} plans", plans.total_items);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IuguClient {
    pub(crate) inner: Arc<ClientInner>,
    services: Arc<Services>,
}

pub(crate) struct ClientInner {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: ClientConfig,
    authorization: String,
    account_id: RwLock<Option<String>>,
}

#[derive(Default)]
struct Services {
    customers: OnceLock<CustomersService>,
    hooks: OnceLock<HooksService>,
    payment_tokens: OnceLock<PaymentTokensService>,
    plans: OnceLock<PlansService>,
    subscriptions: OnceLock<SubscriptionsService>,
}

impl IuguClient {
    /// Create a client for the production API from an API token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_credentials(Credentials::new(api_token)?, ClientConfig::default())
    }

    /// Create a client from `IUGU_TOKEN` and `IUGU_ACCOUNTID`.
    pub fn from_env() -> Result<Self> {
        Self::with_credentials(Credentials::from_env()?, ClientConfig::default())
    }

    /// Create a client with custom configuration, over HTTP(S) with `reqwest`.
    pub fn with_credentials(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(credentials, config, transport))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let authorization = basic_authorization(credentials.api_token());
        let account_id = credentials.account_id().map(str::to_string);

        Self {
            inner: Arc::new(ClientInner {
                transport,
                config,
                authorization,
                account_id: RwLock::new(account_id),
            }),
            services: Arc::new(Services::default()),
        }
    }

    /// The `Authorization` header value sent with every request.
    pub fn authorization_header(&self) -> &str {
        &self.inner.authorization
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The account ID used for payment tokens, if any.
    pub async fn account_id(&self) -> Option<String> {
        self.inner.account_id().await
    }

    /// Replace the account ID used for payment tokens.
    pub async fn set_account_id(&self, account_id: impl Into<String>) {
        let account_id = account_id.into();
        *self.inner.account_id.write().await = (!account_id.is_empty()).then_some(account_id);
    }

    /// Build an authenticated request for an endpoint path such as
    /// `/customers`.
    ///
    /// `headers` are added after the defaults and may override them, except
    /// `Authorization`, which always carries the client credential. Building
    /// never fails; a malformed URL is reported by `begin`.
    pub fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        headers: Option<&[(&str, &str)]>,
    ) -> Request {
        self.inner.make_request(method, endpoint, headers)
    }

    /// Build an authenticated paged request for a collection endpoint.
    ///
    /// A zero `limit` is reported when a page is requested.
    pub fn make_paged_request<T>(
        &self,
        method: Method,
        endpoint: &str,
        limit: u32,
        headers: Option<&[(&str, &str)]>,
    ) -> PagedRequest<T> {
        self.inner.make_paged_request(method, endpoint, limit, headers)
    }

    /// Customer operations.
    pub fn customers(&self) -> &CustomersService {
        self.services
            .customers
            .get_or_init(|| CustomersService::new(self.inner.clone()))
    }

    /// Web hook operations.
    pub fn hooks(&self) -> &HooksService {
        self.services
            .hooks
            .get_or_init(|| HooksService::new(self.inner.clone()))
    }

    /// Card tokenization.
    pub fn payment_tokens(&self) -> &PaymentTokensService {
        self.services
            .payment_tokens
            .get_or_init(|| PaymentTokensService::new(self.inner.clone()))
    }

    /// Plan operations.
    pub fn plans(&self) -> &PlansService {
        self.services
            .plans
            .get_or_init(|| PlansService::new(self.inner.clone()))
    }

    /// Subscription operations.
    pub fn subscriptions(&self) -> &SubscriptionsService {
        self.services
            .subscriptions
            .get_or_init(|| SubscriptionsService::new(self.inner.clone()))
    }
}

impl ClientInner {
    pub(crate) async fn account_id(&self) -> Option<String> {
        self.account_id.read().await.clone()
    }

    pub(crate) fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        headers: Option<&[(&str, &str)]>,
    ) -> Request {
        let mut options = RequestOptions::new(method).with_url(self.config.endpoint_url(endpoint));
        for (key, value) in headers.unwrap_or_default() {
            options = options.with_header(*key, value);
        }
        let mut request = Request::new(self.transport.clone(), options);
        request.set_header("authorization", self.authorization.as_str());
        request
    }

    pub(crate) fn make_paged_request<T>(
        &self,
        method: Method,
        endpoint: &str,
        limit: u32,
        headers: Option<&[(&str, &str)]>,
    ) -> PagedRequest<T> {
        PagedRequest::new(limit, self.make_request(method, endpoint, headers))
    }
}

fn basic_authorization(api_token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{api_token}:")))
}

impl std::fmt::Debug for IuguClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IuguClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
