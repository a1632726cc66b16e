//! Profiles Data

use serde::Serialize;

use crate::{auth::UserUuid, domain::profiles::records::Role};

/// New Profile Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub id: UserUuid,
    pub full_name: String,
    pub role: Role,
}

impl NewProfile {
    /// Profile for a regular account.
    pub fn user(id: UserUuid, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            role: Role::User,
        }
    }
}

/// Profile Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
