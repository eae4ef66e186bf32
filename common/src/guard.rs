use serde::{Deserialize, Serialize};

use crate::identity::UserRole;

/// Screen every restricted request is sent back to.
pub const DEFAULT_SCREEN: &str = "/dashboard";

/// Roles allowed to view a page: either exactly one role or any of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRoles {
    One(UserRole),
    AnyOf(Vec<UserRole>),
}

impl RequiredRoles {
    pub fn allows(&self, current: UserRole) -> bool {
        match self {
            RequiredRoles::One(role) => *role == current,
            RequiredRoles::AnyOf(roles) => roles.contains(&current),
        }
    }
}

impl From<UserRole> for RequiredRoles {
    fn from(role: UserRole) -> Self {
        RequiredRoles::One(role)
    }
}

impl From<&[UserRole]> for RequiredRoles {
    fn from(roles: &[UserRole]) -> Self {
        RequiredRoles::AnyOf(roles.to_vec())
    }
}

impl<const N: usize> From<[UserRole; N]> for RequiredRoles {
    fn from(roles: [UserRole; N]) -> Self {
        RequiredRoles::AnyOf(roles.to_vec())
    }
}

/// Placeholder rendered instead of a page the current role may not see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedView {
    pub title: String,
    pub message: String,
    pub action_label: String,
    /// Where the client must navigate to.
    pub redirect_to: String,
}

impl Default for RestrictedView {
    fn default() -> Self {
        Self {
            title: "Access Restricted".to_string(),
            message: "You do not have permission to view this page.".to_string(),
            action_label: "Back to Dashboard".to_string(),
            redirect_to: DEFAULT_SCREEN.to_string(),
        }
    }
}

/// Gate a page by role.
///
/// Returns `None` when `current` is allowed and the page may render, otherwise
/// the restricted placeholder carrying the redirect to [`DEFAULT_SCREEN`].
pub fn guard(required: impl Into<RequiredRoles>, current: UserRole) -> Option<RestrictedView> {
    if required.into().allows(current) {
        None
    } else {
        Some(RestrictedView::default())
    }
}
