//! Web hook models.

use serde::{Deserialize, Serialize};

use super::primitives::Identified;

/// A web hook: iugu POSTs to `url` whenever `event` happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event name, e.g. `invoice.status_changed`, or `all`
    #[serde(default)]
    pub event: String,
    /// Endpoint that receives notifications
    #[serde(default)]
    pub url: String,
    /// Value sent in the `Authorization` header of each notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

impl Hook {
    /// A new, unsaved hook.
    pub fn new(event: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            event: event.into(),
            url: url.into(),
            authorization: None,
        }
    }

    /// Update body: everything except `id`.
    pub(crate) fn changes(&self) -> HookChanges<'_> {
        HookChanges {
            event: &self.event,
            url: &self.url,
            authorization: self.authorization.as_deref(),
        }
    }
}

impl Identified for Hook {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HookChanges<'a> {
    event: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_strip_id() {
        let hook = Hook {
            id: Some("H1".to_string()),
            ..Hook::new("all", "https://example.com/hook")
        };
        let body = serde_json::to_value(hook.changes()).unwrap();
        assert_eq!(body, json!({ "event": "all", "url": "https://example.com/hook" }));
    }
}
