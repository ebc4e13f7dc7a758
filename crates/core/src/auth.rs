use serde::{Deserialize, Serialize};

/// Identity of the operator performing an action, as exposed by the
/// fronting identity provider. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ActorIdentity {
    /// Creates an actor identity, discarding blank fields.
    #[must_use]
    pub fn new(oid: Option<String>, upn: Option<String>, name: Option<String>) -> Self {
        Self {
            oid: non_blank(oid),
            upn: non_blank(upn),
            name: non_blank(name),
        }
    }

    /// Returns the directory object id.
    #[must_use]
    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    /// Returns the user principal name.
    #[must_use]
    pub fn upn(&self) -> Option<&str> {
        self.upn.as_deref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true when no identity field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.oid.is_none() && self.upn.is_none() && self.name.is_none()
    }

    /// Returns the most specific label for log lines and audit subjects.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.upn().or_else(|| self.oid()).or_else(|| self.name())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
