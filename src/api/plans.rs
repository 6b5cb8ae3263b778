//! Plans service.

use std::sync::Arc;

use crate::client::{ClientInner, Method, PagedRequest, DEFAULT_PAGE_LIMIT};
use crate::models::primitives::require_id;
use crate::models::{NewPlan, Plan, ResourceRef};
use crate::Result;

/// Service for subscription plans.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use iugu_rs::models::{IntervalType, NewPlan};
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// client
///     .plans()
///     .create(&NewPlan::new("Gold", "gold", 1, IntervalType::Months, 4990))
///     .await?;
///
/// let gold = client.plans().get_by_identifier("gold").await?;
///
/// let mut plans = client.plans().list().into_stream();
/// while let Some(plan) = plans.next().await {
///     println!("{:?}", plan?.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PlansService {
    inner: Arc<ClientInner>,
}

impl PlansService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a plan.
    pub async fn create(&self, plan: &NewPlan) -> Result<Plan> {
        self.inner
            .make_request(Method::Post, "/plans", None)
            .begin_with(plan)
            .await
    }

    /// Fetch a plan by ID.
    pub async fn get<'a>(&self, plan: impl Into<ResourceRef<'a, Plan>>) -> Result<Plan> {
        let id = plan.into().resolve("Plan")?;
        self.inner
            .make_request(Method::Get, &format!("/plans/{}", id), None)
            .begin()
            .await
    }

    /// Fetch a plan by its unique identifier.
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Plan> {
        let identifier = require_id(identifier, "Plan identifier")?;
        self.inner
            .make_request(Method::Get, &format!("/plans/identifier/{}", identifier), None)
            .begin()
            .await
    }

    /// All plans, one page at a time.
    pub fn list(&self) -> PagedRequest<Plan> {
        self.inner
            .make_paged_request(Method::Get, "/plans", DEFAULT_PAGE_LIMIT, None)
    }

    /// Save changes to a plan. Everything except the ID and timestamps is sent.
    pub async fn update(&self, plan: &Plan) -> Result<Plan> {
        let id = ResourceRef::Object(plan).resolve("Plan")?;
        self.inner
            .make_request(Method::Put, &format!("/plans/{}", id), None)
            .begin_with(&plan.changes())
            .await
    }

    /// Delete a plan.
    pub async fn delete<'a>(&self, plan: impl Into<ResourceRef<'a, Plan>>) -> Result<()> {
        let id = plan.into().resolve("Plan")?;
        let _: serde_json::Value = self
            .inner
            .make_request(Method::Delete, &format!("/plans/{}", id), None)
            .begin()
            .await?;
        Ok(())
    }
}
