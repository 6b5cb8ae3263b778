//! Web hooks service.

use std::sync::Arc;

use crate::client::{ClientInner, Method};
use crate::models::{Hook, ResourceRef};
use crate::{Error, Result};

/// Service for web hooks.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::models::Hook;
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let events = client.hooks().supported_events().await?;
/// println!("supported: {}", events.join(", "));
///
/// let hook = client
///     .hooks()
///     .create(&Hook::new("invoice.status_changed", "https://example.com/iugu"))
///     .await?;
/// client.hooks().delete(&hook).await?;
/// # Ok(())
/// # }
/// ```
pub struct HooksService {
    inner: Arc<ClientInner>,
}

impl HooksService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Names of the events a hook can subscribe to.
    pub async fn supported_events(&self) -> Result<Vec<String>> {
        self.inner
            .make_request(Method::Get, "/web_hooks/supported_events", None)
            .begin()
            .await
    }

    /// All hooks. This endpoint is not paged.
    pub async fn list(&self) -> Result<Vec<Hook>> {
        self.inner
            .make_request(Method::Get, "/web_hooks", None)
            .begin()
            .await
    }

    /// Fetch a single hook.
    pub async fn get<'a>(&self, hook: impl Into<ResourceRef<'a, Hook>>) -> Result<Hook> {
        let id = hook.into().resolve("Hook")?;
        self.inner
            .make_request(Method::Get, &format!("/web_hooks/{}", id), None)
            .begin()
            .await
    }

    /// Register a hook.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `hook` already has a non-empty ID.
    pub async fn create(&self, hook: &Hook) -> Result<Hook> {
        if hook.id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(Error::InvalidInput(
                "Hook already has an id, use update instead".to_string(),
            ));
        }
        self.inner
            .make_request(Method::Post, "/web_hooks", None)
            .begin_with(hook)
            .await
    }

    /// Save changes to a hook.
    pub async fn update(&self, hook: &Hook) -> Result<Hook> {
        let id = ResourceRef::Object(hook).resolve("Hook")?;
        self.inner
            .make_request(Method::Put, &format!("/web_hooks/{}", id), None)
            .begin_with(&hook.changes())
            .await
    }

    /// Delete a hook, returning the deleted record.
    pub async fn delete<'a>(&self, hook: impl Into<ResourceRef<'a, Hook>>) -> Result<Hook> {
        let id = hook.into().resolve("Hook")?;
        self.inner
            .make_request(Method::Delete, &format!("/web_hooks/{}", id), None)
            .begin()
            .await
    }
}
