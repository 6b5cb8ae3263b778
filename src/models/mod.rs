//! Data models for the iugu API.
//!
//! Models are organized by resource:
//!
//! - [`primitives`] - identifier references and custom variables
//! - [`customer`] - customers
//! - [`payment_method`] - payment methods saved for a customer
//! - [`payment_token`] - card tokenization
//! - [`plan`] - plans, prices and features
//! - [`subscription`] - subscriptions
//! - [`hook`] - web hooks
//!
//! Server timestamps (`created_at`, `updated_at`) are read into
//! `chrono::DateTime<Utc>`; see [`timestamp`].

pub mod customer;
pub mod hook;
pub mod payment_method;
pub mod payment_token;
pub mod plan;
pub mod primitives;
pub mod subscription;
pub mod timestamp;

pub use customer::Customer;
pub use hook::Hook;
pub use payment_method::{CreditCardData, NewPaymentMethod, PaymentMethod};
pub use payment_token::{
    NewPaymentToken, PaymentToken, PaymentTokenCreditCardData, PaymentTokenMethod,
};
pub use plan::{IntervalType, NewPlan, NewPlanFeature, PayableWith, Plan, PlanFeature, PlanPrice};
pub use primitives::{CustomVariable, Identified, ResourceRef};
pub use subscription::{
    LogEntry, NewSubscription, NewSubscriptionSubItem, Subscription, SubscriptionSubItem,
    UpdateSubscription,
};
