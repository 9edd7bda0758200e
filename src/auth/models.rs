//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached user record, serialized the way the remote API sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Present once the user has filled in their profile
    #[serde(
        default,
        rename = "userDetails",
        alias = "profileDetails",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_details: Option<ProfileDetails>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            created_at: None,
            updated_at: None,
            profile_details: None,
        }
    }

    pub fn has_complete_profile(&self) -> bool {
        self.profile_details.is_some()
    }

    /// Shallow merge: every field set in `update` overwrites, the rest are kept
    pub fn merge(&mut self, update: &UserUpdate) {
        if let Some(id) = &update.id {
            self.id = id.clone();
        }
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        if let Some(created_at) = update.created_at {
            self.created_at = Some(created_at);
        }
        if let Some(updated_at) = update.updated_at {
            self.updated_at = Some(updated_at);
        }
        if let Some(details) = &update.profile_details {
            self.profile_details = Some(details.clone());
        }
    }
}

/// Contact and shipping details attached to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        rename = "pincode",
        alias = "postalCode",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileDetails {
    /// True when no contact field is filled in
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.city.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
            && self.phone.is_none()
    }
}

/// A partial user record for `SessionStore::update_user`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "userDetails",
        alias = "profileDetails",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_details: Option<ProfileDetails>,
}

impl From<User> for UserUpdate {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            name: Some(user.name),
            email: Some(user.email),
            is_admin: Some(user.is_admin),
            created_at: user.created_at,
            updated_at: user.updated_at,
            profile_details: user.profile_details,
        }
    }
}

/// The cached token and user, read together
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// New account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ProfileDetails>,
}

/// Successful login or registration exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}
