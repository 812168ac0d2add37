use serde::Deserialize;

use crate::scope::ScopeRequirement;

/// Strategy-level settings shared by every route using the strategy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BasicAuthSettings {
    /// Accept credentials whose username decodes to the empty string.
    pub allow_empty_username: bool,
}

impl Default for BasicAuthSettings {
    fn default() -> Self {
        Self {
            allow_empty_username: false,
        }
    }
}

/// Per-route authentication settings, derived from route configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteAuthConfig {
    pub mode: AuthMode,
    pub scope: ScopeRequirement,
}

/// Whether a route tolerates anonymous requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Every request must carry valid credentials.
    #[default]
    Required,
    /// Requests without basic credentials pass through anonymously; requests
    /// that do attempt basic auth are evaluated normally.
    Optional,
}
