//! Payment method models.

use serde::{Deserialize, Serialize};

use super::primitives::{string_or_number, Identified};

/// Card details shown for a saved payment method or a payment token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCardData {
    /// Name printed on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    /// Masked card number for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<String>,
    /// Card brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Expiry month
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub month: Option<String>,
    /// Expiry year
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
}

/// A payment method saved for a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Description shown to the customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind of payment method (e.g. `credit_card`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Card details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CreditCardData>,
}

impl PaymentMethod {
    /// Update body: only the description can change.
    pub(crate) fn changes(&self) -> PaymentMethodChanges<'_> {
        PaymentMethodChanges {
            description: self.description.as_deref(),
        }
    }
}

impl Identified for PaymentMethod {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PaymentMethodChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Body for attaching a payment method to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentMethod {
    /// Description shown to the customer
    pub description: String,
    /// Payment token obtained from the payment token endpoint
    pub token: String,
    /// Make this the customer's default payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_as_default: Option<bool>,
}

impl NewPaymentMethod {
    /// A payment method from a description and a payment token ID.
    pub fn new(description: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            token: token.into(),
            set_as_default: None,
        }
    }

    /// Mark the new method as the customer's default.
    pub fn as_default(mut self) -> Self {
        self.set_as_default = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_only_description() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "id": "PM1",
            "description": "Work card",
            "item_type": "credit_card",
            "data": { "brand": "VISA", "month": 12, "year": 2030 }
        }))
        .unwrap();
        assert_eq!(method.data.as_ref().unwrap().year.as_deref(), Some("2030"));

        let body = serde_json::to_value(method.changes()).unwrap();
        assert_eq!(body, json!({ "description": "Work card" }));
    }

    #[test]
    fn test_new_payment_method() {
        let body = serde_json::to_value(NewPaymentMethod::new("Card", "TOKEN").as_default()).unwrap();
        assert_eq!(
            body,
            json!({ "description": "Card", "token": "TOKEN", "set_as_default": true })
        );
    }
}
