//! Role hierarchy evaluation
//!
//! Roster uses a fixed, three-level role hierarchy. A principal holding a
//! role may create, delete, or reassign users whose role it dominates:
//!
//! | Acting role | May act on                         |
//! |-------------|------------------------------------|
//! | `Admin`     | every role, including `Admin`      |
//! | `Modifier`  | `Watcher`                          |
//! | `Watcher`   | nothing                            |
//!
//! Read operations (list/get) are not gated by domination; they only require
//! that the requester's role is a recognised one (see [`role_exists`]).
//!
//! ## Example
//!
//! ```
//! use roster_core::rbac::{Role, can_act, can_act_on_all};
//!
//! assert!(can_act(Role::Modifier, Role::Watcher));
//! assert!(!can_act(Role::Modifier, Role::Modifier));
//! assert!(can_act_on_all(Role::Admin, &[Role::Admin, Role::Watcher]));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A role that can be held by a user or asserted by a requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control over the directory
    Admin,

    /// May manage watchers
    Modifier,

    /// Read-only access
    Watcher,
}

impl Role {
    /// Get all available roles
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Modifier, Role::Watcher]
    }

    /// Roles this role explicitly dominates.
    ///
    /// Admin's entry omits itself; [`can_act`] grants Admin everything
    /// regardless of this table.
    pub fn subordinates(&self) -> &'static [Role] {
        match self {
            Role::Admin => &[Role::Modifier, Role::Watcher],
            Role::Modifier => &[Role::Watcher],
            Role::Watcher => &[],
        }
    }

    /// Get the role's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Modifier => "Modifier",
            Role::Watcher => "Watcher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    // Names are matched exactly; "admin" is not "Admin".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Check whether `name` is one of the recognised roles
pub fn role_exists(name: &str) -> bool {
    name.parse::<Role>().is_ok()
}

/// Check whether a principal holding `acting` may act on a target holding `target`
pub fn can_act(acting: Role, target: Role) -> bool {
    acting == Role::Admin || acting.subordinates().contains(&target)
}

/// Check whether `acting` may act on every role in `targets`
///
/// Used when assigning a multi-role set: each assigned role must be
/// individually permitted. An empty slice is vacuously permitted; callers
/// reject empty role sets during validation.
pub fn can_act_on_all(acting: Role, targets: &[Role]) -> bool {
    targets.iter().all(|target| can_act(acting, *target))
}
