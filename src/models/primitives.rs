//! Identifier helpers shared by every resource.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// A record that may carry a server-assigned ID.
pub trait Identified {
    /// The record's ID, if it has one.
    fn id(&self) -> Option<&str>;
}

/// A resource given either by its ID or by a record carrying that ID.
///
/// Operations that act on an existing resource accept anything that
/// converts into a `ResourceRef`, so both `"C0FFEE"` and `&customer` work.
///
/// # Example
///
/// ```
/// use iugu_rs::models::{Customer, ResourceRef};
///
/// let by_id: ResourceRef<'_, Customer> = "C0FFEE".into();
/// assert_eq!(by_id.resolve("customer").unwrap(), "C0FFEE");
///
/// let unsaved = Customer::new("Ana", "ana@example.com");
/// let by_object: ResourceRef<'_, Customer> = (&unsaved).into();
/// assert!(by_object.resolve("customer").is_err());
/// ```
#[derive(Debug)]
pub enum ResourceRef<'a, T> {
    /// A bare identifier.
    Id(&'a str),
    /// A record whose `id` is used.
    Object(&'a T),
}

impl<'a, T: Identified> ResourceRef<'a, T> {
    /// Reduce the reference to a non-empty ID.
    ///
    /// `what` names the resource in the error message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the ID is empty or the record has
    /// none.
    pub fn resolve(&self, what: &str) -> Result<&'a str> {
        let id = match *self {
            ResourceRef::Id(id) => id,
            ResourceRef::Object(object) => object.id().unwrap_or_default(),
        };
        require_id(id, what)
    }
}

impl<T> Clone for ResourceRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceRef<'_, T> {}

impl<'a, T> From<&'a str> for ResourceRef<'a, T> {
    fn from(id: &'a str) -> Self {
        ResourceRef::Id(id)
    }
}

impl<'a, T> From<&'a String> for ResourceRef<'a, T> {
    fn from(id: &'a String) -> Self {
        ResourceRef::Id(id.as_str())
    }
}

impl<'a, T: Identified> From<&'a T> for ResourceRef<'a, T> {
    fn from(object: &'a T) -> Self {
        ResourceRef::Object(object)
    }
}

/// Reject an empty identifier.
pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} id must not be empty", what)));
    }
    Ok(id)
}

/// Read a field that the API sends either as a string or as a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// A name/value pair attached to customers and subscriptions.
///
/// # Example
///
/// ```
/// use iugu_rs::models::CustomVariable;
///
/// let var = CustomVariable::new("database_id", "1");
/// assert_eq!(var.to_string(), "database_id=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVariable {
    /// Variable name
    pub name: String,
    /// Variable value
    pub value: String,
}

impl CustomVariable {
    /// Create a custom variable.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for CustomVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
