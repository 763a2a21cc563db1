//! User roles and capability checks.
//!
//! Roles form a closed set rather than free-form strings so authorization
//! decisions are made through the capability methods below instead of string
//! comparisons scattered across handlers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Moderator,
    Admin,
}

impl Role {
    /// Stable storage / wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may approve or reject submitted content.
    pub fn can_moderate(self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    /// Whether this role has full administrative access.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether a principal with this role may mutate content owned by
    /// `owner_id`. Admins may mutate anything; everyone else only their own.
    pub fn can_mutate_owned(self, principal_id: i64, owner_id: Option<i64>) -> bool {
        self.is_admin() || owner_id == Some(principal_id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Internal(format!("unknown role '{other}'"))),
        }
    }
}
