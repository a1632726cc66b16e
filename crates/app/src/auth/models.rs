//! Auth data models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::uuids::TypedUuid;

/// Signed-in account, as returned by the auth API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Account id
    pub id: UserUuid,

    /// Sign-in email
    #[serde(default)]
    pub email: Option<String>,

    /// Free-form metadata set at sign-up or by [`UserAttributes`]
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl AuthUser {
    /// Display name from the account metadata.
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata.get("full_name").and_then(Value::as_str)
    }
}

/// Account id
pub type UserUuid = TypedUuid<AuthUser>;

/// Authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for store requests
    pub access_token: String,

    /// Token used to obtain a new access token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Unix time at which the access token expires
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// Session owner
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token has expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now.as_second() >= expires_at)
    }
}

/// Email and password credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Sign-in email
    pub email: String,

    /// Account password
    pub password: String,
}

/// New account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    /// Sign-in credentials
    pub credentials: Credentials,

    /// Display name stored in the account metadata
    pub full_name: String,
}

/// Account metadata changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserAttributes {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// New avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
