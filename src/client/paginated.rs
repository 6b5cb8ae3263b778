//! Paged requests for collection endpoints.
//!
//! A [`PagedRequest`] wraps a [`Request`] and rewrites its `limit` and
//! `start` query parameters before every page is fetched. For lazy
//! iteration over all items, [`PagedRequest::into_stream`] returns a
//! [`PaginatedStream`] that implements the `Stream` trait.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::request::Request;
use crate::{Error, Result};

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// One page of a collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Total number of items across all pages.
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    /// The items in this page, in server order.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A request against a collection endpoint, fetched one page at a time.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let mut customers = client.customers().list();
///
/// let first = customers.request_page().await?;
/// println!("{} customers in total", first.total_items);
///
/// let second = customers.next().await?;
/// for customer in second.items {
///     println!("{}", customer.email);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PagedRequest<T> {
    request: Request,
    page: u32,
    limit: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PagedRequest<T> {
    /// Wrap a request with a fixed page size.
    ///
    /// A zero `limit` is accepted here and rejected when a page is requested.
    pub fn new(limit: u32, request: Request) -> Self {
        Self {
            request,
            page: 0,
            limit,
            _marker: PhantomData,
        }
    }

    /// The current zero-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Jump to a page.
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Maximum number of items per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The underlying request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Mutable access to the underlying request, e.g. to add headers or
    /// filter parameters.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// Offset of the first item of the current page.
    pub fn start(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page)
    }

    /// Rewrite `limit` and `start` for the current page, keeping every
    /// other query parameter.
    fn prepare_page(&mut self) -> Result<Request> {
        if self.limit == 0 {
            return Err(Error::InvalidInput(
                "Page limit must be greater than zero".to_string(),
            ));
        }
        let mut url = self.request.require_url()?.clone();

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "limit" && k != "start")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("limit", &self.limit.to_string())
            .append_pair("start", &self.start().to_string());

        self.request.set_url(url.as_str())?;
        Ok(self.request.clone())
    }
}

impl<T: DeserializeOwned> PagedRequest<T> {
    /// Fetch the current page without advancing.
    pub async fn request_page(&mut self) -> Result<PagedResponse<T>> {
        let request = self.prepare_page()?;
        request.begin().await
    }

    /// Fetch the current page, sending `body` as JSON.
    pub async fn request_page_with<B>(&mut self, body: &B) -> Result<PagedResponse<T>>
    where
        B: Serialize + ?Sized,
    {
        let request = self.prepare_page()?;
        request.begin_with(body).await
    }

    /// Advance one page and fetch it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] without sending anything if the page
    /// index is already `u32::MAX`.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<PagedResponse<T>> {
        self.advance()?;
        self.request_page().await
    }

    /// Advance one page and fetch it, sending `body` as JSON.
    pub async fn next_with<B>(&mut self, body: &B) -> Result<PagedResponse<T>>
    where
        B: Serialize + ?Sized,
    {
        self.advance()?;
        self.request_page_with(body).await
    }

    fn advance(&mut self) -> Result<()> {
        self.page = self
            .page
            .checked_add(1)
            .ok_or_else(|| Error::InvalidInput("Page index overflow".to_string()))?;
        Ok(())
    }
}

impl<T> PagedRequest<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Turn this request into a stream over every item, starting at the
    /// current page.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use futures_util::StreamExt;
    ///
    /// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
    /// let mut plans = client.plans().list().into_stream();
    ///
    /// while let Some(plan) = plans.next().await {
    ///     let plan = plan?;
    ///     println!("{:?}", plan.identifier);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_stream(self) -> PaginatedStream<T> {
        let first_page = self.page;
        let skipped = self.start();
        let template = self;

        PaginatedStream::new(first_page, skipped, move |page: u32| {
            let mut paged = template.clone();
            paged.set_page(page);
            Box::pin(async move { paged.request_page().await })
        })
    }
}

impl<T> Clone for PagedRequest<T> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            page: self.page,
            limit: self.limit,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PagedRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedRequest")
            .field("request", &self.request)
            .field("page", &self.page)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchPage<T> = Box<dyn Fn(u32) -> BoxFuture<'static, Result<PagedResponse<T>>> + Send + Sync>;

/// A stream that lazily fetches pages from a collection endpoint.
///
/// Items are yielded one at a time; the next page is requested only when
/// the current one is exhausted. The stream ends after an empty page, once
/// `total_items` items have been yielded, or after the first error.
pub struct PaginatedStream<T> {
    fetch_page: FetchPage<T>,
    current_items: std::collections::VecDeque<T>,
    next_page: Option<u32>,
    yielded: u64,
    pending_fetch: Option<BoxFuture<'static, Result<PagedResponse<T>>>>,
}

impl<T> PaginatedStream<T> {
    /// `skipped` counts the items on the pages before `first_page`.
    fn new<F>(first_page: u32, skipped: u64, fetch_page: F) -> Self
    where
        F: Fn(u32) -> BoxFuture<'static, Result<PagedResponse<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: std::collections::VecDeque::new(),
            next_page: Some(first_page),
            yielded: skipped,
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                this.yielded += 1;
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(response)) => {
                        this.pending_fetch = None;
                        let fetched = response.items.len() as u64;
                        this.current_items = response.items.into();

                        let exhausted = fetched == 0
                            || this.yielded + fetched >= response.total_items;
                        this.next_page = match this.next_page {
                            Some(page) if !exhausted => page.checked_add(1),
                            _ => None,
                        };

                        if this.current_items.is_empty() {
                            return Poll::Ready(None);
                        }
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_page = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(page) = this.next_page {
                this.pending_fetch = Some((this.fetch_page)(page));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}

impl<T> fmt::Debug for PaginatedStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedStream")
            .field("buffered", &self.current_items.len())
            .field("next_page", &self.next_page)
            .field("yielded", &self.yielded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request::tests::RecordingTransport;
    use crate::client::{Method, RequestOptions};
    use futures_util::StreamExt;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn paged(transport: Arc<RecordingTransport>, url: &str, limit: u32) -> PagedRequest<serde_json::Value> {
        let request = Request::new(transport, RequestOptions::new(Method::Get).with_url(url));
        PagedRequest::new(limit, request)
    }

    fn query(request: &crate::client::TransportRequest) -> HashMap<String, String> {
        request.url.query_pairs().into_owned().collect()
    }

    #[tokio::test]
    async fn test_zero_limit_rejected_on_request() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 0);
        assert_eq!(req.limit(), 0);

        let err = req.request_page().await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_on_request() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(transport.clone(), "not a url", 10);
        let err = req.request_page().await.unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_next_at_last_page_index() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 10);
        req.set_page(u32::MAX);

        let err = req.next().await.unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(req.page(), u32::MAX);
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_math() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(transport.clone(), "https://api.iugu.com/v1/customers", 100);
        req.set_page(2);
        req.request_page().await.unwrap();

        let q = query(&transport.last());
        assert_eq!(q["limit"], "100");
        assert_eq!(q["start"], "200");
        assert_eq!(req.page(), 2);

        req.next().await.unwrap();
        let q = query(&transport.last());
        assert_eq!(q["start"], "300");
        assert_eq!(req.page(), 3);
    }

    #[tokio::test]
    async fn test_first_page_start_zero() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 25);
        req.request_page().await.unwrap();
        let q = query(&transport.last());
        assert_eq!(q["limit"], "25");
        assert_eq!(q["start"], "0");
    }

    #[tokio::test]
    async fn test_existing_params_preserved_and_overwritten() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":0,"items":[]}"#);
        let mut req = paged(
            transport.clone(),
            "https://api.iugu.com/v1/customers?query=ana&limit=7&start=3&sortBy[name]=asc",
            10,
        );
        req.set_page(1);
        req.request_page().await.unwrap();

        let sent = transport.last();
        let pairs: Vec<(String, String)> = sent.url.query_pairs().into_owned().collect();
        assert_eq!(pairs.iter().filter(|(k, _)| k == "limit").count(), 1);
        assert_eq!(pairs.iter().filter(|(k, _)| k == "start").count(), 1);

        let q = query(&sent);
        assert_eq!(q["query"], "ana");
        assert_eq!(q["sortBy[name]"], "asc");
        assert_eq!(q["limit"], "10");
        assert_eq!(q["start"], "10");
        assert_eq!(sent.url.path(), "/v1/customers");
    }

    #[tokio::test]
    async fn test_page_response_decoded() {
        let transport = RecordingTransport::new(
            200,
            r#"{"totalItems":3,"items":[{"id":"a"},{"id":"b"}]}"#,
        );
        let mut req = paged(transport, "https://api.iugu.com/v1/plans", 2);
        let page = req.request_page().await.unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1]["id"], "b");
    }

    #[tokio::test]
    async fn test_stream_stops_at_total() {
        let transport = RecordingTransport::new(
            200,
            r#"{"totalItems":2,"items":[{"id":"a"},{"id":"b"}]}"#,
        );
        let req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 2);
        let items: Vec<_> = req.into_stream().collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_from_later_page_counts_skipped_items() {
        let transport = RecordingTransport::new(200, r#"{"totalItems":3,"items":[{"id":"c"}]}"#);
        let mut req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 2);
        req.set_page(1);
        let items: Vec<_> = req.into_stream().collect().await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap()["id"], "c");
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
        assert_eq!(query(&transport.last())["start"], "2");
    }

    #[tokio::test]
    async fn test_stream_stops_on_error() {
        let transport = RecordingTransport::new(500, "boom");
        let req = paged(transport.clone(), "https://api.iugu.com/v1/plans", 2);
        let items: Vec<_> = req.into_stream().collect().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap_err().status(), Some(500));
    }
}
