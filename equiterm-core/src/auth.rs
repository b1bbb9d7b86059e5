//! Session and account status types

use serde::{Deserialize, Serialize};

/// Current session status, fetched fresh from the backend per render cycle.
///
/// This is a volatile capability flag, never cached beyond a single UI
/// refresh pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
    pub username: String,
}

impl AuthStatus {
    /// The fail-open default: logged out, free tier.
    ///
    /// Any failure to reach the backend degrades to this rather than
    /// surfacing an error.
    pub fn guest() -> Self {
        Self {
            logged_in: false,
            is_premium: false,
            username: "Guest".to_string(),
        }
    }
}

impl Default for AuthStatus {
    fn default() -> Self {
        Self::guest()
    }
}

/// Login / registration credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
