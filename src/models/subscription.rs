//! Subscription models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::PayableWith;
use super::primitives::{CustomVariable, Identified};

/// A line item billed with a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSubItem {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Unit price in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    /// Formatted unit price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Formatted total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

/// An entry of a subscription's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// What happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When it happened
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// An existing subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the subscription is suspended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    /// Whether the subscription is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Whether the subscription is in its trial period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_trial: Option<bool>,
    /// Identifier of the subscribed plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_identifier: Option<String>,
    /// Name of the subscribed plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Plan reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_ref: Option<String>,
    /// Price in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    /// Currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Plan features, as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<serde_json::Value>,
    /// Expiry date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Date of the last cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycled_at: Option<String>,
    /// Remaining credits, for credit-based subscriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
    /// Whether the subscription is credit-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_based: Option<bool>,
    /// Minimum credits before a new charge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_min: Option<i64>,
    /// Credits added per cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_cycle: Option<i64>,
    /// Subscribed customer ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Subscribed customer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Subscribed customer e-mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Recent invoices, as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_invoices: Option<serde_json::Value>,
    /// Line items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<SubscriptionSubItem>,
    /// History
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogEntry>,
    /// Custom name/value pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_variables: Vec<CustomVariable>,
    /// Creation time
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Subscription {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A line item to create with a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSubscriptionSubItem {
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    /// Quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Bill on every cycle instead of only once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent: Option<bool>,
}

/// Body for creating a subscription.
///
/// # Example
///
/// ```
/// use iugu_rs::models::NewSubscription;
///
/// let sub = NewSubscription::new("CUSTOMER_ID", "gold");
/// assert_eq!(sub.plan_identifier.as_deref(), Some("gold"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    /// Identifier of the plan to subscribe to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_identifier: Option<String>,
    /// Customer to subscribe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Expiry date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Only activate once the first charge succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_on_charge_success: Option<bool>,
    /// Accepted payment methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable_with: Option<PayableWith>,
    /// Credit-based subscription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_based: Option<bool>,
    /// Price in cents, for credit-based subscriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    /// Credits added per cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_cycle: Option<i64>,
    /// Minimum credits before a new charge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_min: Option<i64>,
    /// Line items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<NewSubscriptionSubItem>,
    /// Custom name/value pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_variables: Vec<CustomVariable>,
}

impl NewSubscription {
    /// Subscribe a customer to a plan.
    pub fn new(customer_id: impl Into<String>, plan_identifier: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            plan_identifier: Some(plan_identifier.into()),
            ..Default::default()
        }
    }
}

/// Body for updating a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSubscription {
    /// Fields shared with creation
    #[serde(flatten)]
    pub base: NewSubscription,
    /// Suspend or resume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    /// Skip the charge that the change would trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_charge: Option<bool>,
}
