//! # Roster Core
//!
//! Domain logic for the Roster user directory:
//!
//! - [`rbac`]: the fixed Admin / Modifier / Watcher hierarchy and the pure
//!   functions that decide whether one role may act on another
//! - [`user`]: user records and request payload validation
//! - [`store`]: the concurrency-safe in-memory user store
//!
//! Nothing in this crate logs or touches a transport; callers translate
//! [`DirectoryError`] values into responses.

pub mod error;
pub mod rbac;
pub mod store;
pub mod user;

pub use error::{DirectoryError, Result};
pub use rbac::{Role, UnknownRole, can_act, can_act_on_all, role_exists};
pub use store::{UserRepository, UserStore};
pub use user::{CreateUserRequest, NewUser, RoleUpdateRequest, User, ValidationError};
