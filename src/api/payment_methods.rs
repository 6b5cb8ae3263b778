//! Payment methods service, nested under customers.

use std::sync::Arc;

use crate::client::{ClientInner, Method};
use crate::models::primitives::require_id;
use crate::models::{Customer, NewPaymentMethod, PaymentMethod, ResourceRef};
use crate::Result;

/// Service for the payment methods saved for a customer.
///
/// Every operation takes the owning customer either by ID or as a
/// [`Customer`] record.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::models::NewPaymentMethod;
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let methods = client.customers().payment_methods();
///
/// let card = methods
///     .create("CUSTOMER_ID", &NewPaymentMethod::new("Main card", "TOKEN").as_default())
///     .await?;
/// for method in methods.list("CUSTOMER_ID").await? {
///     println!("{:?}", method.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaymentMethodsService {
    inner: Arc<ClientInner>,
}

impl PaymentMethodsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All payment methods of a customer.
    ///
    /// This endpoint is not paged.
    pub async fn list<'a>(
        &self,
        customer: impl Into<ResourceRef<'a, Customer>>,
    ) -> Result<Vec<PaymentMethod>> {
        let customer = customer.into().resolve("Customer")?;
        self.inner
            .make_request(Method::Get, &collection(customer), None)
            .begin()
            .await
    }

    /// Fetch a single payment method.
    pub async fn get<'a>(
        &self,
        customer: impl Into<ResourceRef<'a, Customer>>,
        id: &str,
    ) -> Result<PaymentMethod> {
        let customer = customer.into().resolve("Customer")?;
        let id = require_id(id, "Payment method")?;
        self.inner
            .make_request(Method::Get, &member(customer, id), None)
            .begin()
            .await
    }

    /// Save a new payment method from a card token.
    pub async fn create<'a>(
        &self,
        customer: impl Into<ResourceRef<'a, Customer>>,
        payment_method: &NewPaymentMethod,
    ) -> Result<PaymentMethod> {
        let customer = customer.into().resolve("Customer")?;
        self.inner
            .make_request(Method::Post, &collection(customer), None)
            .begin_with(payment_method)
            .await
    }

    /// Save changes to a payment method. Only the description can change.
    pub async fn update<'a>(
        &self,
        customer: impl Into<ResourceRef<'a, Customer>>,
        payment_method: &PaymentMethod,
    ) -> Result<PaymentMethod> {
        let customer = customer.into().resolve("Customer")?;
        let id = ResourceRef::Object(payment_method).resolve("Payment method")?;
        self.inner
            .make_request(Method::Put, &member(customer, id), None)
            .begin_with(&payment_method.changes())
            .await
    }

    /// Remove a payment method.
    pub async fn delete<'a>(
        &self,
        customer: impl Into<ResourceRef<'a, Customer>>,
        payment_method: impl Into<ResourceRef<'a, PaymentMethod>>,
    ) -> Result<()> {
        let customer = customer.into().resolve("Customer")?;
        let id = payment_method.into().resolve("Payment method")?;
        let _: serde_json::Value = self
            .inner
            .make_request(Method::Delete, &member(customer, id), None)
            .begin()
            .await?;
        Ok(())
    }
}

fn collection(customer: &str) -> String {
    format!("/customers/{}/payment_methods", customer)
}

fn member(customer: &str, id: &str) -> String {
    format!("/customers/{}/payment_methods/{}", customer, id)
}
