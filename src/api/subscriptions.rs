//! Subscriptions service.

use std::sync::Arc;

use crate::client::{ClientInner, Method, PagedRequest, DEFAULT_PAGE_LIMIT};
use crate::models::{NewSubscription, ResourceRef, Subscription, UpdateSubscription};
use crate::Result;

/// Service for subscriptions.
///
/// Operations on an existing subscription take it either by ID or as a
/// [`Subscription`] record.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::models::{NewSubscription, UpdateSubscription};
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let sub = client
///     .subscriptions()
///     .create(&NewSubscription::new("CUSTOMER_ID", "gold"))
///     .await?;
///
/// let sub = client.subscriptions().suspend(&sub).await?;
///
/// let change = UpdateSubscription {
///     skip_charge: Some(true),
///     ..Default::default()
/// };
/// client.subscriptions().update(&sub, &change).await?;
/// # Ok(())
/// # }
/// ```
pub struct SubscriptionsService {
    inner: Arc<ClientInner>,
}

impl SubscriptionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a subscription.
    pub async fn create(&self, subscription: &NewSubscription) -> Result<Subscription> {
        self.inner
            .make_request(Method::Post, "/subscriptions", None)
            .begin_with(subscription)
            .await
    }

    /// Fetch a subscription.
    pub async fn get<'a>(
        &self,
        subscription: impl Into<ResourceRef<'a, Subscription>>,
    ) -> Result<Subscription> {
        let id = subscription.into().resolve("Subscription")?;
        self.inner
            .make_request(Method::Get, &format!("/subscriptions/{}", id), None)
            .begin()
            .await
    }

    /// All subscriptions, one page at a time.
    pub fn list(&self) -> PagedRequest<Subscription> {
        self.inner
            .make_paged_request(Method::Get, "/subscriptions", DEFAULT_PAGE_LIMIT, None)
    }

    /// Activate a subscription.
    pub async fn activate<'a>(
        &self,
        subscription: impl Into<ResourceRef<'a, Subscription>>,
    ) -> Result<Subscription> {
        self.action(subscription.into(), "activate").await
    }

    /// Suspend a subscription.
    pub async fn suspend<'a>(
        &self,
        subscription: impl Into<ResourceRef<'a, Subscription>>,
    ) -> Result<Subscription> {
        self.action(subscription.into(), "suspend").await
    }

    /// Change a subscription.
    pub async fn update<'a>(
        &self,
        subscription: impl Into<ResourceRef<'a, Subscription>>,
        changes: &UpdateSubscription,
    ) -> Result<Subscription> {
        let id = subscription.into().resolve("Subscription")?;
        self.inner
            .make_request(Method::Put, &format!("/subscriptions/{}", id), None)
            .begin_with(changes)
            .await
    }

    /// Delete a subscription, returning the deleted record.
    pub async fn delete<'a>(
        &self,
        subscription: impl Into<ResourceRef<'a, Subscription>>,
    ) -> Result<Subscription> {
        let id = subscription.into().resolve("Subscription")?;
        self.inner
            .make_request(Method::Delete, &format!("/subscriptions/{}", id), None)
            .begin()
            .await
    }

    async fn action(
        &self,
        subscription: ResourceRef<'_, Subscription>,
        action: &str,
    ) -> Result<Subscription> {
        let id = subscription.resolve("Subscription")?;
        self.inner
            .make_request(Method::Post, &format!("/subscriptions/{}/{}", id, action), None)
            .begin()
            .await
    }
}
