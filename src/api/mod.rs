//! API service modules for iugu endpoints.
//!
//! Each service covers one resource. Services are reached through
//! [`IuguClient`](crate::IuguClient) and validate identifiers before any
//! request is sent.

mod customers;
mod hooks;
mod payment_methods;
mod payment_tokens;
mod plans;
mod subscriptions;

pub use customers::CustomersService;
pub use hooks::HooksService;
pub use payment_methods::PaymentMethodsService;
pub use payment_tokens::PaymentTokensService;
pub use plans::PlansService;
pub use subscriptions::SubscriptionsService;
