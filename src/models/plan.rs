//! Plan models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::Identified;

/// Billing interval unit of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    /// Weekly cycles
    Weeks,
    /// Monthly cycles
    Months,
}

/// Payment methods accepted for a plan's subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayableWith {
    /// Any method
    #[default]
    All,
    /// Credit card only
    CreditCard,
    /// Bank slip (boleto) only
    BankSlip,
}

/// A plan price in one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Currency code, e.g. `BRL`
    #[serde(default)]
    pub currency: String,
    /// ID of the plan this price belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    /// Amount in cents
    #[serde(default)]
    pub value_cents: i64,
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

/// A feature to create along with a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPlanFeature {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Quantity included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// A feature of an existing plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFeature {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Quantity included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Undocumented server field, passed through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<serde_json::Value>,
    /// ID of the plan this feature belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    /// Display position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
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

/// Body for creating a plan.
///
/// # Example
///
/// ```
/// use iugu_rs::models::{IntervalType, NewPlan, PayableWith};
///
/// let plan = NewPlan::new("Gold", "gold", 1, IntervalType::Months, 4990)
///     .payable_with(PayableWith::CreditCard);
/// assert_eq!(plan.value_cents, 4990);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlan {
    /// Display name
    pub name: String,
    /// Unique identifier, used by subscriptions
    pub identifier: String,
    /// Number of `interval_type` units between charges
    pub interval: u32,
    /// Interval unit
    pub interval_type: IntervalType,
    /// Price in cents
    pub value_cents: i64,
    /// Accepted payment methods
    pub payable_with: PayableWith,
    /// Included features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<NewPlanFeature>,
}

impl NewPlan {
    /// A plan payable with any method and without features.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        interval: u32,
        interval_type: IntervalType,
        value_cents: i64,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            interval,
            interval_type,
            value_cents,
            payable_with: PayableWith::All,
            features: Vec::new(),
        }
    }

    /// Restrict the accepted payment methods.
    pub fn payable_with(mut self, payable_with: PayableWith) -> Self {
        self.payable_with = payable_with;
        self
    }

    /// Add a feature.
    pub fn feature(mut self, feature: NewPlanFeature) -> Self {
        self.features.push(feature);
        self
    }
}

/// An existing plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Number of `interval_type` units between charges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Interval unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_type: Option<IntervalType>,
    /// Prices per currency
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<PlanPrice>,
    /// Included features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<PlanFeature>,
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

impl Plan {
    /// Update body: everything except `id` and timestamps.
    pub(crate) fn changes(&self) -> PlanChanges<'_> {
        PlanChanges {
            name: self.name.as_deref(),
            identifier: self.identifier.as_deref(),
            interval: self.interval,
            interval_type: self.interval_type,
            prices: &self.prices,
            features: &self.features,
        }
    }
}

impl Identified for Plan {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval_type: Option<IntervalType>,
    #[serde(skip_serializing_if = "<[PlanPrice]>::is_empty")]
    prices: &'a [PlanPrice],
    #[serde(skip_serializing_if = "<[PlanFeature]>::is_empty")]
    features: &'a [PlanFeature],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_plan_wire_format() {
        let plan = NewPlan::new("Gold", "gold", 1, IntervalType::Months, 4990)
            .payable_with(PayableWith::BankSlip);
        let body = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Gold",
                "identifier": "gold",
                "interval": 1,
                "interval_type": "months",
                "value_cents": 4990,
                "payable_with": "bank_slip"
            })
        );
    }

    #[test]
    fn test_plan_changes() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "P1",
            "name": "Silver",
            "identifier": "silver",
            "interval": 2,
            "interval_type": "weeks",
            "prices": [{ "currency": "BRL", "value_cents": 1000, "plan_id": "P1" }],
            "created_at": "2020-05-01T10:00:00-03:00"
        }))
        .unwrap();
        assert!(plan.created_at.is_some());

        let body = serde_json::to_value(plan.changes()).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("created_at").is_none());
        assert_eq!(body["interval_type"], "weeks");
        assert_eq!(body["prices"][0]["value_cents"], 1000);
    }
}
