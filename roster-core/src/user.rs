//! User records and the request payloads that create or modify them.

use serde::{Deserialize, Serialize};

use crate::rbac::{Role, UnknownRole};

/// A user stored in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier (decimal counter value)
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique across the directory, compared exactly
    pub email: String,
    /// Ordered role set; the first entry is the primary role
    pub roles: Vec<Role>,
}

impl User {
    /// The user's primary role, used for delete eligibility.
    ///
    /// Stored users always carry at least one role, so this only returns
    /// `None` for records built by hand outside the store.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Email, checked for uniqueness by the store
    pub email: String,
    /// Role set, primary role first
    pub roles: Vec<Role>,
}

/// Decoded body of a create request, before validation
///
/// Missing fields decode as empty so that validation can name them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Display name; required
    #[serde(default)]
    pub name: String,
    /// Email; required
    #[serde(default)]
    pub email: String,
    /// Role names as sent on the wire; at least one required
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CreateUserRequest {
    /// Check that every required field is present
    pub fn validate_required_fields(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.roles.is_empty() {
            return Err(ValidationError::MissingRoles);
        }
        Ok(())
    }

    /// Validate the request and resolve its role names
    pub fn into_new_user(self) -> Result<NewUser, ValidationError> {
        self.validate_required_fields()?;
        let roles = parse_roles(&self.roles)?;
        Ok(NewUser {
            name: self.name,
            email: self.email,
            roles,
        })
    }
}

/// Decoded body of a role update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    /// Replacement role names
    #[serde(default)]
    pub roles: Vec<String>,
}

impl RoleUpdateRequest {
    /// Resolve the requested role names, rejecting an empty set
    pub fn parse_roles(&self) -> Result<Vec<Role>, ValidationError> {
        if self.roles.is_empty() {
            return Err(ValidationError::MissingRoles);
        }
        parse_roles(&self.roles)
    }
}

fn parse_roles(names: &[String]) -> Result<Vec<Role>, ValidationError> {
    names
        .iter()
        .map(|name| name.parse::<Role>().map_err(ValidationError::from))
        .collect()
}

/// Errors raised when a request payload fails validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name absent or empty
    #[error("name is required")]
    MissingName,

    /// Email absent or empty
    #[error("email is required")]
    MissingEmail,

    /// Role list absent or empty
    #[error("roles are required")]
    MissingRoles,

    /// A role name outside the fixed set
    #[error("invalid role: {0}")]
    InvalidRole(String),
}

impl From<UnknownRole> for ValidationError {
    fn from(err: UnknownRole) -> Self {
        ValidationError::InvalidRole(err.0)
    }
}
