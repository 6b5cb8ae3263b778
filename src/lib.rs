//! # iugu-rs
//!
//! An async Rust client for the [iugu](https://iugu.com) payment API.
//!
//! ## Features
//!
//! - **Customers**: create, update, list and delete customers and their saved
//!   payment methods
//! - **Plans and subscriptions**: recurring billing, including activation and
//!   suspension
//! - **Web hooks**: register endpoints for account events
//! - **Payment tokens**: tokenize card data
//! - **Pagination**: page-by-page requests or a lazy `Stream` of items
//! - **Pluggable transport**: every request goes through the [`client::Transport`]
//!   trait, with a `reqwest` implementation by default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iugu_rs::IuguClient;
//! use iugu_rs::models::Customer;
//!
//! #[tokio::main]
//! async fn main() -> iugu_rs::Result<()> {
//!     // Reads IUGU_TOKEN and, optionally, IUGU_ACCOUNTID
//!     let client = IuguClient::from_env()?;
//!
//!     let customer = client
//!         .customers()
//!         .create(&Customer::new("Ana Souza", "ana@example.com"))
//!         .await?;
//!     println!("created {:?}", customer.id);
//!
//!     let page = client.customers().list().request_page().await?;
//!     println!("{} customers in total", page.total_items);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Non-2xx responses come back as [`Error::Http`] with the body untouched:
//!
//! ```rust,no_run
//! # async fn example(client: iugu_rs::IuguClient) {
//! match client.customers().get("MISSING").await {
//!     Ok(customer) => println!("{}", customer.name),
//!     Err(iugu_rs::Error::Http { status, str_body, .. }) => {
//!         eprintln!("iugu answered {}: {}", status, str_body);
//!     }
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use client::{ClientConfig, Credentials, IuguClient};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```rust
/// use iugu_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{
        ClientConfig, Credentials, IuguClient, Method, PagedRequest, PagedResponse, Request,
        Transport,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        CustomVariable, Identified, ResourceRef,
        // Customers
        CreditCardData, Customer, NewPaymentMethod, PaymentMethod,
        // Tokens
        NewPaymentToken, PaymentToken, PaymentTokenCreditCardData, PaymentTokenMethod,
        // Plans
        IntervalType, NewPlan, NewPlanFeature, PayableWith, Plan, PlanFeature, PlanPrice,
        // Subscriptions
        LogEntry, NewSubscription, NewSubscriptionSubItem, Subscription, SubscriptionSubItem,
        UpdateSubscription,
        // Hooks
        Hook,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            ClientConfig::default().base_url.as_str(),
            "https://api.iugu.com/v1"
        );
    }

    #[test]
    fn test_client_authorization() {
        let client = IuguClient::new("token123").unwrap();
        assert_eq!(client.authorization_header(), "Basic dG9rZW4xMjM6");
    }
}
