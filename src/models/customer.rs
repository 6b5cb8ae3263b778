//! Customer models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::{string_or_number, CustomVariable, Identified};

/// A customer registered on the iugu account.
///
/// # Example
///
/// ```
/// use iugu_rs::models::{Customer, CustomVariable};
///
/// let mut customer = Customer::new("Ana Souza", "ana@example.com");
/// customer.zip_code = Some("01310-100".to_string());
/// customer.custom_variables.push(CustomVariable::new("database_id", "1"));
/// assert!(customer.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// E-mail address. Required.
    #[serde(default)]
    pub email: String,
    /// Full name. Required.
    #[serde(default)]
    pub name: String,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// CPF or CNPJ, required for registered bank slips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<String>,
    /// Extra e-mail addresses to copy, comma separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_emails: Option<String>,
    /// Postal code (CEP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Street number
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    /// Street name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// District, required when `zip_code` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Address complement (room, floor, references)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    /// Custom name/value pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_variables: Vec<CustomVariable>,
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

impl Customer {
    /// A new, unsaved customer with the two required fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// The mutable fields of this customer, as sent on update.
    pub(crate) fn changes(&self) -> CustomerChanges<'_> {
        CustomerChanges {
            email: &self.email,
            name: &self.name,
            notes: self.notes.as_deref(),
            cpf_cnpj: self.cpf_cnpj.as_deref(),
            cc_emails: self.cc_emails.as_deref(),
            zip_code: self.zip_code.as_deref(),
            number: self.number.as_deref(),
            street: self.street.as_deref(),
            city: self.city.as_deref(),
            state: self.state.as_deref(),
            district: self.district.as_deref(),
            complement: self.complement.as_deref(),
            custom_variables: &self.custom_variables,
        }
    }
}

impl Identified for Customer {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Update body for a customer: everything except `id` and timestamps.
#[derive(Debug, Serialize)]
pub(crate) struct CustomerChanges<'a> {
    email: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpf_cnpj: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc_emails: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complement: Option<&'a str>,
    #[serde(skip_serializing_if = "<[CustomVariable]>::is_empty")]
    custom_variables: &'a [CustomVariable],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_server_customer() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "77C2565F6F064A26ABED4255894224F0",
            "email": "email@email.com",
            "name": "Nome do Cliente",
            "notes": "Anotações Gerais",
            "number": 1200,
            "created_at": "2013-11-18T14:58:30-02:00",
            "updated_at": "2013-11-18T14:58:30-02:00",
            "custom_variables": [{ "name": "db_id", "value": "7" }]
        }))
        .unwrap();

        assert_eq!(customer.id(), Some("77C2565F6F064A26ABED4255894224F0"));
        assert_eq!(customer.number.as_deref(), Some("1200"));
        assert_eq!(
            customer.created_at.unwrap().to_rfc3339(),
            "2013-11-18T16:58:30+00:00"
        );
        assert_eq!(customer.custom_variables[0].value, "7");
    }

    #[test]
    fn test_new_customer_serializes_minimal() {
        let value = serde_json::to_value(Customer::new("Ana", "ana@example.com")).unwrap();
        assert_eq!(value, json!({ "email": "ana@example.com", "name": "Ana" }));
    }

    #[test]
    fn test_changes_drop_identity_fields() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "ABC",
            "email": "a@b.c",
            "name": "A",
            "city": "Recife",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-02T00:00:00Z"
        }))
        .unwrap();

        let body = serde_json::to_value(customer.changes()).unwrap();
        assert_eq!(body, json!({ "email": "a@b.c", "name": "A", "city": "Recife" }));
        assert_eq!(customer.id(), Some("ABC"));
    }
}
