//! Payment tokens service.

use std::sync::Arc;

use crate::client::{ClientInner, Method};
use crate::models::{NewPaymentToken, PaymentToken};
use crate::{Error, Result};

/// Service for card tokenization.
///
/// A token stands in for card data when saving a payment method or
/// charging a customer.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::models::{NewPaymentToken, PaymentTokenCreditCardData};
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let card = PaymentTokenCreditCardData {
///     number: "4111111111111111".to_string(),
///     verification_value: "123".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Souza".to_string(),
///     month: "12".to_string(),
///     year: "2030".to_string(),
/// };
///
/// let token = client
///     .payment_tokens()
///     .create(NewPaymentToken::credit_card(card).test_mode())
///     .await?;
/// println!("{:?}", token.id);
/// # Ok(())
/// # }
/// ```
pub struct PaymentTokensService {
    inner: Arc<ClientInner>,
}

impl PaymentTokensService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Tokenize card data.
    ///
    /// An empty `account_id` is filled with the client's account ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if neither `token` nor the client has
    /// an account ID.
    pub async fn create(&self, mut token: NewPaymentToken) -> Result<PaymentToken> {
        if token.account_id.is_empty() {
            token.account_id = self.inner.account_id().await.ok_or_else(|| {
                Error::InvalidInput("Account id is required to create a payment token".to_string())
            })?;
        }
        self.inner
            .make_request(Method::Post, "/payment_token", None)
            .begin_with(&token)
            .await
    }
}
