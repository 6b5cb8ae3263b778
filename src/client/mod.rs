//! HTTP client and request core for the iugu API.
//!
//! [`IuguClient`] is the entry point. It builds authenticated [`Request`]s
//! and [`PagedRequest`]s and hands out the resource services. Requests go
//! through a [`Transport`]; [`HttpTransport`] is the default, over `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use iugu_rs::client::Method;
//! use iugu_rs::IuguClient;
//!
//! # async fn example() -> iugu_rs::Result<()> {
//! let client = IuguClient::from_env()?;
//!
//! let events: Vec<String> = client
//!     .make_request(Method::Get, "/web_hooks/supported_events", None)
//!     .begin()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod config;
mod http;
pub mod paginated;
mod request;
mod transport;

pub use config::{
    ClientConfig, Credentials, ACCOUNT_ID_ENV_VAR, DEFAULT_BASE_URL, TOKEN_ENV_VAR,
};
pub use http::IuguClient;
pub use paginated::{PagedRequest, PagedResponse, PaginatedStream, DEFAULT_PAGE_LIMIT};
pub use request::{Request, RequestOptions};
pub use transport::{
    HttpTransport, Method, Transport, TransportKind, TransportRequest, TransportResponse,
};
pub(crate) use http::ClientInner;
