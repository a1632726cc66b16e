//! Profile Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::auth::UserUuid;

/// Access role of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Profile Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Same id as the account
    pub id: UserUuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl ProfileRecord {
    /// Whether the account may manage the catalog.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
