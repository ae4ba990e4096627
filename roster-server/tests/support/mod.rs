// Code is used by test modules, but not in every scope
#![allow(unused)]

use anyhow::Result;
use axum_test::TestServer;
use roster_core::{NewUser, Role};
use roster_server::{AppState, create_app, infra::config::Config};

pub const ADMIN: &str = "Admin";
pub const MODIFIER: &str = "Modifier";
pub const WATCHER: &str = "Watcher";

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("default configuration")
}

pub fn test_state() -> AppState {
    AppState::with_empty_store(test_config())
}

pub fn build_test_server(state: AppState) -> Result<TestServer> {
    TestServer::new(create_app(state)).map_err(|err| anyhow::anyhow!(err.to_string()))
}

/// Seed the directory used by most scenarios.
///
/// IDs: 1 Leia (Admin), 2 Obi-Wan (Modifier), 3 R2-D2 (Watcher),
/// 4 Vegeta (Modifier), 5 Gohan (Watcher), 6 Goku (Admin).
pub fn seed_users(state: &AppState) {
    let users = [
        ("Leia Organa", "leia@example.com", Role::Admin),
        ("Obi-Wan Kenobi", "obi-wan@example.com", Role::Modifier),
        ("R2-D2", "r2-d2@example.com", Role::Watcher),
        ("Vegeta", "vegeta@example.com", Role::Modifier),
        ("Gohan", "gohan@example.com", Role::Watcher),
        ("Goku", "goku@example.com", Role::Admin),
    ];

    for (name, email, role) in users {
        state
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                roles: vec![role],
            })
            .expect("seed user");
    }
}
