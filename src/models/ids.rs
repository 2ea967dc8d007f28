//! Strongly-typed ID wrappers for all entity types
//!
//! Each entity gets its own newtype over a UUID so a fund id can never be
//! passed where a deposit id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Behaviour shared by every entity id
pub trait EntityId: Copy + Eq + Hash + fmt::Display + fmt::Debug {
    /// Prefix used in the short display form (e.g. `fnd-`)
    const PREFIX: &'static str;

    fn as_uuid(&self) -> &Uuid;

    /// Whether a user-typed identifier refers to this id.
    ///
    /// Accepts the full UUID, the short display form, or any unambiguous
    /// UUID prefix with or without the display prefix.
    fn matches_short(&self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            return false;
        }
        let bare = input.strip_prefix(Self::PREFIX).unwrap_or(input);
        self.as_uuid().to_string().starts_with(&bare.to_lowercase())
    }
}

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl EntityId for $name {
            const PREFIX: &'static str = $display_prefix;

            fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(UserId, "usr-");
define_id!(ExpenseTypeId, "typ-");
define_id!(FundId, "fnd-");
define_id!(BudgetId, "bud-");
define_id!(ExpenseHeaderId, "exp-");
define_id!(ExpenseDetailId, "det-");
define_id!(DepositId, "dep-");
