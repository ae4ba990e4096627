use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use roster_core::{UserRepository, UserStore};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<Config>,
    pub started_at: DateTime<Utc>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("users", &self.users.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self {
            users,
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }

    /// State backed by a fresh, empty [`UserStore`].
    pub fn with_empty_store(config: Config) -> Self {
        Self::new(Arc::new(UserStore::new()), config)
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
