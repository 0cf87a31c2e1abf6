//! Well-known role names and the closed [`Role`] set.
//!
//! The string constants are what gets embedded in JWT claims and the JSON
//! snapshot, so they must stay stable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EXECUTIVE: &str = "executive";
pub const ROLE_ADMINISTRATOR: &str = "administrator";

/// The role an actor plays in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owns and drafts scorecards. Reports to at most one manager.
    Contributor,
    /// First-tier reviewer for their direct reports.
    Manager,
    /// Second-tier reviewer for every scorecard.
    Executive,
    /// Manages actors; takes no part in reviews.
    Administrator,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Contributor,
        Role::Manager,
        Role::Executive,
        Role::Administrator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Contributor => ROLE_CONTRIBUTOR,
            Role::Manager => ROLE_MANAGER,
            Role::Executive => ROLE_EXECUTIVE,
            Role::Administrator => ROLE_ADMINISTRATOR,
        }
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
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{s}'. Must be one of: {}",
                    Role::ALL.map(Role::as_str).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let err = "ceo".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role 'ceo'"));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Role::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");
    }
}
