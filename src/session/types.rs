use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

/// Body returned by the identity provider's ticket exchange.
#[derive(Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SessionPayload {
    /// Opaque session token. Never inspected by this crate.
    pub token: String,
    /// Profile of the signed-in user, when the provider sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<JsonValue>,
}

impl SessionPayload {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: JsonValue) -> Self {
        self.user = Some(user);
        self
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for SessionPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPayload")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Full-page navigation the host must perform.
///
/// The calling context is abandoned once the host follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    pub url: Url,
}

impl RedirectAction {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

impl std::fmt::Display for RedirectAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed with the in-app navigation unchanged.
    Allow,
    /// Cancel the navigation and send the browser elsewhere.
    Redirect(RedirectAction),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}
