//! In-memory user store
//!
//! [`UserStore`] is the single source of truth for user records. One mutex
//! guards the record map, the email index, and the ID counter together, so
//! every operation (including the uniqueness check plus insert in
//! [`UserRepository::create`]) is observed atomically by concurrent callers.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};

use crate::error::{DirectoryError, Result};
use crate::rbac::Role;
use crate::user::{NewUser, User};

/// Operations over the user collection
///
/// The dispatch layer depends on this trait rather than on [`UserStore`]
/// directly. Implementations must make each call atomic with respect to
/// every other call.
pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning the next ID
    fn create(&self, user: NewUser) -> Result<User>;

    /// Find a user by ID
    fn get(&self, id: &str) -> Result<User>;

    /// All users ordered by ascending numeric ID
    fn list(&self) -> Vec<User>;

    /// Replace a user's role set wholesale
    fn update_roles(&self, id: &str, roles: Vec<Role>) -> Result<()>;

    /// Remove a user permanently
    fn delete(&self, id: &str) -> Result<()>;

    /// Remove a user only if `guard` accepts the current record
    ///
    /// Lookup, guard evaluation, and removal happen in one critical section.
    /// Returns [`DirectoryError::Forbidden`] when the guard rejects.
    fn delete_if(&self, id: &str, guard: &dyn Fn(&User) -> bool) -> Result<User>;

    /// Wipe every record and restart ID assignment at 1
    fn reset(&self);

    /// Number of stored users
    fn len(&self) -> usize;

    /// Whether the store holds no users
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    // Keyed by numeric ID so iteration order is ascending numeric order.
    users: BTreeMap<u64, User>,
    emails: HashSet<String>,
    last_id: u64,
}

/// Mutex-guarded, process-local [`UserRepository`]
#[derive(Debug, Default)]
pub struct UserStore {
    inner: Mutex<StoreInner>,
}

impl UserStore {
    /// Create an empty store whose first assigned ID will be `"1"`
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map an external ID onto its numeric key.
///
/// Only canonical decimal strings match; `"01"` or `"+1"` never name user 1.
fn parse_id(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|key| key.to_string() == id)
}

impl UserRepository for UserStore {
    fn create(&self, user: NewUser) -> Result<User> {
        let mut inner = self.inner.lock();

        if inner.emails.contains(&user.email) {
            return Err(DirectoryError::DuplicateEmail);
        }

        inner.last_id += 1;
        let key = inner.last_id;
        let record = User {
            id: key.to_string(),
            name: user.name,
            email: user.email,
            roles: user.roles,
        };

        inner.emails.insert(record.email.clone());
        inner.users.insert(key, record.clone());
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<User> {
        let key = parse_id(id).ok_or(DirectoryError::NotFound)?;
        self.inner
            .lock()
            .users
            .get(&key)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    fn list(&self) -> Vec<User> {
        self.inner.lock().users.values().cloned().collect()
    }

    fn update_roles(&self, id: &str, roles: Vec<Role>) -> Result<()> {
        let key = parse_id(id).ok_or(DirectoryError::NotFound)?;
        let mut inner = self.inner.lock();
        let user = inner.users.get_mut(&key).ok_or(DirectoryError::NotFound)?;
        user.roles = roles;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.delete_if(id, &|_: &User| true).map(|_| ())
    }

    fn delete_if(&self, id: &str, guard: &dyn Fn(&User) -> bool) -> Result<User> {
        let key = parse_id(id).ok_or(DirectoryError::NotFound)?;
        let mut inner = self.inner.lock();

        let allowed = match inner.users.get(&key) {
            Some(user) => guard(user),
            None => return Err(DirectoryError::NotFound),
        };
        if !allowed {
            return Err(DirectoryError::Forbidden);
        }

        let removed = inner.users.remove(&key).ok_or(DirectoryError::NotFound)?;
        inner.emails.remove(&removed.email);
        Ok(removed)
    }

    fn reset(&self) {
        *self.inner.lock() = StoreInner::default();
    }

    fn len(&self) -> usize {
        self.inner.lock().users.len()
    }
}
