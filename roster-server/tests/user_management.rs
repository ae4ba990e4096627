use anyhow::Result;
use axum::http::StatusCode;
use roster_core::Role;
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;

use support::{ADMIN, MODIFIER, WATCHER, build_test_server, seed_users, test_state};

const ROLE_HEADER: &str = "X-User-Type";
const INSUFFICIENT: &str = "insufficient permissions to assign role";
const ROLES_UPDATED: &str = "User roles updated successfully";

fn created(id: &str) -> Value {
    json!({"id": id, "message": "User created successfully"})
}

fn message(text: &str) -> Value {
    json!({"message": text})
}

#[tokio::test]
async fn create_user_permissions_follow_hierarchy() -> Result<()> {
    let server = build_test_server(test_state())?;

    let cases = [
        (ADMIN, "binks", json!(["Admin"]), StatusCode::CREATED, created("1")),
        (ADMIN, "vader", json!(["Modifier"]), StatusCode::CREATED, created("2")),
        (ADMIN, "yoda", json!(["Watcher"]), StatusCode::CREATED, created("3")),
        (ADMIN, "amidala", json!(["Modifier", "Watcher"]), StatusCode::CREATED, created("4")),
        (ADMIN, "yoda", json!(["Watcher"]), StatusCode::CONFLICT, message("user already exists")),
        (MODIFIER, "chewbacca", json!(["Modifier"]), StatusCode::FORBIDDEN, message(INSUFFICIENT)),
        (MODIFIER, "wicket", json!(["Watcher"]), StatusCode::CREATED, created("5")),
        (WATCHER, "greedo", json!(["Watcher"]), StatusCode::FORBIDDEN, message(INSUFFICIENT)),
        ("Unknown", "jabba", json!(["Watcher"]), StatusCode::FORBIDDEN, message("forbidden")),
    ];

    for (requester, name, roles, status, body) in cases {
        let response = server
            .post("/users")
            .add_header(ROLE_HEADER, requester)
            .json(&json!({"name": name, "email": format!("{name}@example.com"), "roles": roles}))
            .await;

        assert_eq!(response.status_code(), status, "{requester} creating {name}");
        assert_eq!(response.json::<Value>(), body, "{requester} creating {name}");
    }

    Ok(())
}

#[tokio::test]
async fn create_user_rejects_incomplete_payloads() -> Result<()> {
    let server = build_test_server(test_state())?;

    let cases = [
        (json!({"email": "a@example.com", "roles": ["Watcher"]}), "name is required"),
        (json!({"name": "A", "roles": ["Watcher"]}), "email is required"),
        (json!({"name": "A", "email": "a@example.com", "roles": []}), "roles are required"),
        (
            json!({"name": "A", "email": "a@example.com", "roles": ["Senator"]}),
            "invalid role: Senator",
        ),
    ];

    for (payload, message) in cases {
        let response = server
            .post("/users")
            .add_header(ROLE_HEADER, ADMIN)
            .json(&payload)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"message": message}));
    }

    // Nothing was stored, so the next ID is still 1.
    let response = server
        .post("/users")
        .add_header(ROLE_HEADER, ADMIN)
        .json(&json!({"name": "A", "email": "a@example.com", "roles": ["Watcher"]}))
        .await;
    assert_eq!(response.json::<Value>()["id"], "1");

    Ok(())
}

#[tokio::test]
async fn list_users_requires_a_known_role() -> Result<()> {
    let state = test_state();
    seed_users(&state);
    let server = build_test_server(state)?;

    for (requester, status) in [
        (ADMIN, StatusCode::OK),
        (WATCHER, StatusCode::OK),
        ("Unknown", StatusCode::FORBIDDEN),
    ] {
        let response = server.get("/users").add_header(ROLE_HEADER, requester).await;
        response.assert_status(status);
    }

    let response = server.get("/users").add_header(ROLE_HEADER, WATCHER).await;
    let users: Vec<Value> = response.json();
    let ids: Vec<&str> = users.iter().filter_map(|u| u["id"].as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);

    // No header at all is treated like an unknown role.
    server.get("/users").await.assert_status(StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn get_user_returns_single_record_or_fallback_listing() -> Result<()> {
    let state = test_state();
    seed_users(&state);
    let server = build_test_server(state.clone())?;

    let response = server.get("/users/1").add_header(ROLE_HEADER, ADMIN).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!([{"id": "1", "name": "Leia Organa", "email": "leia@example.com", "roles": ["Admin"]}])
    );

    let response = server.get("/users/1").add_header(ROLE_HEADER, "Unknown").await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>(), json!({"message": "forbidden"}));

    let response = server.get("/users/999").add_header(ROLE_HEADER, ADMIN).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 6);

    state.users().reset();
    let response = server.get("/users/999").add_header(ROLE_HEADER, ADMIN).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!([]));

    Ok(())
}

#[tokio::test]
async fn delete_user_checks_primary_role() -> Result<()> {
    let state = test_state();
    seed_users(&state);
    let server = build_test_server(state.clone())?;

    let cases = [
        (ADMIN, "1", StatusCode::NO_CONTENT, None),
        (ADMIN, "2", StatusCode::NO_CONTENT, None),
        (MODIFIER, "3", StatusCode::NO_CONTENT, None),
        (MODIFIER, "4", StatusCode::FORBIDDEN, Some("forbidden")),
        (WATCHER, "5", StatusCode::FORBIDDEN, Some("forbidden")),
        (ADMIN, "999", StatusCode::NOT_FOUND, Some("user not found")),
    ];

    for (requester, id, status, expected) in cases {
        let response = server
            .delete(&format!("/users/{id}"))
            .add_header(ROLE_HEADER, requester)
            .await;

        assert_eq!(response.status_code(), status, "{requester} deleting {id}");
        match expected {
            Some(text) => assert_eq!(response.json::<Value>(), message(text)),
            None => assert!(response.text().is_empty()),
        }
    }

    let remaining: Vec<String> = state.users().list().into_iter().map(|u| u.id).collect();
    assert_eq!(remaining, ["4", "5", "6"]);

    Ok(())
}

#[tokio::test]
async fn delete_uses_only_first_role_of_multi_role_target() -> Result<()> {
    let state = test_state();
    let server = build_test_server(state.clone())?;

    server
        .post("/users")
        .add_header(ROLE_HEADER, ADMIN)
        .json(&json!({
            "name": "Ahsoka",
            "email": "ahsoka@example.com",
            "roles": ["Watcher", "Modifier"],
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // A Modifier could not have assigned this role set, but may delete it
    // because the primary role is Watcher.
    server
        .delete("/users/1")
        .add_header(ROLE_HEADER, MODIFIER)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(state.users().is_empty());

    Ok(())
}

#[tokio::test]
async fn update_roles_replaces_role_set_when_permitted() -> Result<()> {
    let state = test_state();
    seed_users(&state);
    let server = build_test_server(state.clone())?;

    let cases = [
        (ADMIN, "1", json!(["Modifier"]), StatusCode::OK, message(ROLES_UPDATED)),
        (MODIFIER, "1", json!(["Admin"]), StatusCode::FORBIDDEN, message(INSUFFICIENT)),
        (ADMIN, "999", json!(["Modifier"]), StatusCode::NOT_FOUND, message("user not found")),
        (ADMIN, "2", json!(["Pilot"]), StatusCode::BAD_REQUEST, message("invalid role: Pilot")),
        (ADMIN, "2", json!([]), StatusCode::BAD_REQUEST, message("roles are required")),
        ("Unknown", "2", json!(["Watcher"]), StatusCode::FORBIDDEN, message("forbidden")),
    ];

    for (requester, id, roles, status, body) in cases {
        let response = server
            .put(&format!("/users/roles/{id}"))
            .add_header(ROLE_HEADER, requester)
            .json(&json!({"roles": roles}))
            .await;

        assert_eq!(response.status_code(), status, "{requester} updating {id}");
        assert_eq!(response.json::<Value>(), body, "{requester} updating {id}");
    }

    assert_eq!(state.users().get("1")?.roles, vec![Role::Modifier]);
    assert_eq!(state.users().get("2")?.roles, vec![Role::Modifier]);

    Ok(())
}

#[tokio::test]
async fn end_to_end_lifecycle() -> Result<()> {
    let server = build_test_server(test_state())?;

    let created = server
        .post("/users")
        .add_header(ROLE_HEADER, ADMIN)
        .json(&json!({
            "name": "Padme Amidala",
            "email": "amidala@example.com",
            "roles": ["Modifier", "Watcher"],
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.json::<Value>()["id"], "1");

    server
        .post("/users")
        .add_header(ROLE_HEADER, MODIFIER)
        .json(&json!({
            "name": "Chewbacca",
            "email": "chewbacca@example.com",
            "roles": ["Modifier"],
        }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .delete("/users/1")
        .add_header(ROLE_HEADER, ADMIN)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let fetched = server.get("/users/1").add_header(ROLE_HEADER, ADMIN).await;
    fetched.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(fetched.json::<Value>(), json!([]));

    // The deleted ID is not handed out again.
    let recreated = server
        .post("/users")
        .add_header(ROLE_HEADER, ADMIN)
        .json(&json!({
            "name": "Padme Amidala",
            "email": "amidala@example.com",
            "roles": ["Watcher"],
        }))
        .await;
    assert_eq!(recreated.json::<Value>()["id"], "2");

    Ok(())
}
