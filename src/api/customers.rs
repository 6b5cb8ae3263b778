//! Customers service.

use std::sync::{Arc, OnceLock};

use crate::client::{ClientInner, Method, PagedRequest, DEFAULT_PAGE_LIMIT};
use crate::models::{Customer, ResourceRef};
use crate::{Error, Result};

use super::PaymentMethodsService;

/// Service for customer operations.
///
/// # Example
///
/// ```no_run
/// use iugu_rs::models::Customer;
///
/// # async fn example(client: iugu_rs::IuguClient) -> iugu_rs::Result<()> {
/// let mut customer = client
///     .customers()
///     .create(&Customer::new("Ana Souza", "ana@example.com"))
///     .await?;
///
/// customer.city = Some("Recife".to_string());
/// let customer = client.customers().update(&customer).await?;
///
/// client.customers().delete(&customer).await?;
/// # Ok(())
/// # }
/// ```
pub struct CustomersService {
    inner: Arc<ClientInner>,
    payment_methods: OnceLock<PaymentMethodsService>,
}

impl CustomersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            payment_methods: OnceLock::new(),
        }
    }

    /// Payment methods saved for customers.
    pub fn payment_methods(&self) -> &PaymentMethodsService {
        self.payment_methods
            .get_or_init(|| PaymentMethodsService::new(self.inner.clone()))
    }

    /// All customers, one page at a time.
    pub fn list(&self) -> PagedRequest<Customer> {
        self.inner
            .make_paged_request(Method::Get, "/customers", DEFAULT_PAGE_LIMIT, None)
    }

    /// Fetch a single customer.
    pub async fn get<'a>(&self, customer: impl Into<ResourceRef<'a, Customer>>) -> Result<Customer> {
        let id = customer.into().resolve("Customer")?;
        self.inner
            .make_request(Method::Get, &format!("/customers/{}", id), None)
            .begin()
            .await
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `customer` already has a non-empty ID.
    pub async fn create(&self, customer: &Customer) -> Result<Customer> {
        if customer.id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(Error::InvalidInput(
                "Customer already has an id, use update instead".to_string(),
            ));
        }
        self.inner
            .make_request(Method::Post, "/customers", None)
            .begin_with(&customer.changes())
            .await
    }

    /// Save changes to an existing customer.
    ///
    /// Only the mutable fields are sent; `customer` itself is left as is.
    pub async fn update(&self, customer: &Customer) -> Result<Customer> {
        let id = ResourceRef::Object(customer).resolve("Customer")?;
        self.inner
            .make_request(Method::Put, &format!("/customers/{}", id), None)
            .begin_with(&customer.changes())
            .await
    }

    /// Delete a customer.
    pub async fn delete<'a>(&self, customer: impl Into<ResourceRef<'a, Customer>>) -> Result<()> {
        let id = customer.into().resolve("Customer")?;
        let _: serde_json::Value = self
            .inner
            .make_request(Method::Delete, &format!("/customers/{}", id), None)
            .begin()
            .await?;
        Ok(())
    }
}
