//! Payment token models.

use serde::{Deserialize, Serialize};

use super::payment_method::CreditCardData;
use super::primitives::Identified;

/// Payment methods that can be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTokenMethod {
    /// Credit card
    #[default]
    CreditCard,
}

/// Raw card data sent to create a token.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTokenCreditCardData {
    /// Card number
    pub number: String,
    /// Card verification value (CVV)
    pub verification_value: String,
    /// Holder's first name as printed
    pub first_name: String,
    /// Holder's last name as printed
    pub last_name: String,
    /// Expiry month
    pub month: String,
    /// Expiry year
    pub year: String,
}

impl std::fmt::Debug for PaymentTokenCreditCardData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentTokenCreditCardData")
            .field("number", &"[REDACTED]")
            .field("verification_value", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("month", &self.month)
            .field("year", &self.year)
            .finish()
    }
}

/// Body for creating a payment token.
///
/// Leave `account_id` empty to use the account ID the client was
/// configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentToken {
    /// iugu account ID
    #[serde(default)]
    pub account_id: String,
    /// Payment method
    pub method: PaymentTokenMethod,
    /// `true` for test-mode tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    /// Card data
    pub data: PaymentTokenCreditCardData,
}

impl NewPaymentToken {
    /// A credit card token request, using the client's account ID.
    pub fn credit_card(data: PaymentTokenCreditCardData) -> Self {
        Self {
            account_id: String::new(),
            method: PaymentTokenMethod::CreditCard,
            test: None,
            data,
        }
    }

    /// Request a test-mode token.
    pub fn test_mode(mut self) -> Self {
        self.test = Some(true);
        self
    }
}

/// A created payment token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentToken {
    /// The token, used as `token` when creating payment methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentTokenMethod>,
    /// Card details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<CreditCardData>,
    /// `true` for test-mode tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
}

impl Identified for PaymentToken {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card() -> PaymentTokenCreditCardData {
        PaymentTokenCreditCardData {
            number: "4111111111111111".to_string(),
            verification_value: "123".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            month: "12".to_string(),
            year: "2030".to_string(),
        }
    }

    #[test]
    fn test_new_token_wire_format() {
        let mut token = NewPaymentToken::credit_card(card()).test_mode();
        token.account_id = "ACC".to_string();
        let body = serde_json::to_value(&token).unwrap();
        assert_eq!(body["method"], "credit_card");
        assert_eq!(body["account_id"], "ACC");
        assert_eq!(body["test"], true);
        assert_eq!(body["data"]["verification_value"], "123");
    }

    #[test]
    fn test_debug_hides_card_number() {
        let debug = format!("{:?}", card());
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("Ana"));
    }

    #[test]
    fn test_deserialize_token() {
        let token: PaymentToken = serde_json::from_value(json!({
            "id": "TOK",
            "method": "credit_card",
            "extra_info": { "brand": "VISA", "display_number": "XXXX-1111" },
            "test": true
        }))
        .unwrap();
        assert_eq!(token.id(), Some("TOK"));
        assert_eq!(token.method, Some(PaymentTokenMethod::CreditCard));
    }
}
