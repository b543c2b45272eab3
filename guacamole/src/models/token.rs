//! Auth token model.

use serde::Deserialize;

/// An ephemeral Guacamole auth token.
///
/// A token belongs to exactly one collection cycle and is released at the end
/// of it. The value never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the raw token value, for building requests only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Body returned by `POST /api/tokens`.
///
/// Only `authToken` matters to the collection cycle; the remaining fields are
/// used for diagnostics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    /// The issued token, empty if the server omitted it.
    #[serde(default)]
    pub auth_token: String,

    /// The user the token was issued to.
    #[serde(default)]
    pub username: String,

    /// The data source the server picked for this login.
    #[serde(default)]
    pub data_source: String,

    /// Every data source the user can access.
    #[serde(default)]
    pub available_data_sources: Vec<String>,
}

impl TokenGrant {
    /// Returns true if `data_source` can be queried with this grant.
    ///
    /// An empty `availableDataSources` list is treated as "unknown" and accepts
    /// any data source.
    #[must_use]
    pub fn grants_access_to(&self, data_source: &str) -> bool {
        self.available_data_sources.is_empty()
            || self.available_data_sources.iter().any(|ds| ds == data_source)
    }
}
