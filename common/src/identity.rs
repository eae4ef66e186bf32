use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable account identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role a user has in the marketplace. Chosen once at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Vendor,
    Supplier,
}

impl UserRole {
    pub fn all() -> &'static [UserRole] {
        &[UserRole::Vendor, UserRole::Supplier]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Vendor => "vendor",
            UserRole::Supplier => "supplier",
        }
    }

    /// Heading used on the dashboard ("Vendor Dashboard").
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Vendor => "Vendor",
            UserRole::Supplier => "Supplier",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected 'vendor' or 'supplier'")]
pub struct ParseRoleError(pub String);

impl FromStr for UserRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vendor" => Ok(UserRole::Vendor),
            "supplier" => Ok(UserRole::Supplier),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Profile document stored in the `users` collection.
///
/// Everything except `company_name` is fixed at signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub company_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(id: UserId, email: &str, company_name: &str, role: UserRole) -> Self {
        Self {
            id,
            email: email.to_string(),
            company_name: company_name.to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Name shown to the other side of a conversation.
    pub fn display_name(&self) -> &str {
        if self.company_name.trim().is_empty() {
            &self.email
        } else {
            &self.company_name
        }
    }

    /// Company line shown under the name in the conversation list.
    pub fn company_label(&self) -> String {
        match self.role {
            UserRole::Vendor => "Street Food Vendor".to_string(),
            UserRole::Supplier => self.company_name.clone(),
        }
    }
}
