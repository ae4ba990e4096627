//! User collection endpoints: create, list, get, delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use roster_core::{CreateUserRequest, DirectoryError, User, can_act, can_act_on_all};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    payload::JsonPayload,
};
use crate::users::requester::Requester;

pub const USER_CREATED: &str = "User created successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: String,
    pub message: String,
}

/// Create a user
///
/// Every requested role must be dominated by the requester's role.
pub async fn create_user_handler(
    State(state): State<AppState>,
    requester: Requester,
    JsonPayload(request): JsonPayload<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    if let Err(err) = request.validate_required_fields() {
        warn!(error = %err, "BadRequest: create user");
        return Err(err.into());
    }

    let acting = requester.require_role().inspect_err(|_| {
        warn!(
            requester = %requester.asserted,
            "Forbidden: unknown role attempted to create a user"
        );
    })?;

    let new_user = request.into_new_user().inspect_err(|err| {
        warn!(error = %err, "BadRequest: create user");
    })?;

    if !can_act_on_all(acting, &new_user.roles) {
        warn!(
            requester = %acting,
            roles = ?new_user.roles,
            "Forbidden: role not permitted to assign requested roles"
        );
        return Err(DirectoryError::InsufficientPermissions.into());
    }

    let user = state.users().create(new_user).inspect_err(|err| {
        warn!(error = %err, "Conflict: create user");
    })?;

    info!(user_id = %user.id, email = %user.email, requester = %acting, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            id: user.id,
            message: USER_CREATED.to_string(),
        }),
    ))
}

/// List every user in ascending ID order
pub async fn list_users_handler(
    State(state): State<AppState>,
    requester: Requester,
) -> AppResult<Json<Vec<User>>> {
    requester.require_role().inspect_err(|_| {
        warn!(
            requester = %requester.asserted,
            "Forbidden: unknown role attempted to list users"
        );
    })?;

    let users = state.users().list();
    info!(count = users.len(), "Users listed");
    Ok(Json(users))
}

/// Fetch one user, wrapped in a one-element array
///
/// An unknown ID falls back to the full listing: 200 with every user when
/// the directory is non-empty, 404 with an empty array otherwise.
pub async fn get_user_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<Vec<User>>)> {
    requester.require_role().inspect_err(|_| {
        warn!(
            requester = %requester.asserted,
            "Forbidden: unknown role attempted to get a user"
        );
    })?;

    match state.users().get(&id) {
        Ok(user) => {
            info!(user_id = %user.id, "User retrieved");
            Ok((StatusCode::OK, Json(vec![user])))
        }
        Err(DirectoryError::NotFound) => {
            let users = state.users().list();
            if users.is_empty() {
                info!(user_id = %id, "User not found and directory is empty");
                Ok((StatusCode::NOT_FOUND, Json(users)))
            } else {
                info!(user_id = %id, count = users.len(), "User not found, returning all users");
                Ok((StatusCode::OK, Json(users)))
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Delete a user
///
/// Only the target's primary (first) role is checked against the requester,
/// unlike create and role updates which check every assigned role.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    delete_user(&state, &requester, &id)
}

/// `DELETE /users/` names no user and is answered like an unknown ID
pub async fn delete_unnamed_user_handler(
    State(state): State<AppState>,
    requester: Requester,
) -> AppResult<StatusCode> {
    delete_user(&state, &requester, "")
}

fn delete_user(state: &AppState, requester: &Requester, id: &str) -> AppResult<StatusCode> {
    let acting = requester.require_role().inspect_err(|_| {
        warn!(
            requester = %requester.asserted,
            "Forbidden: unknown role attempted to delete a user"
        );
    })?;

    let eligible = |target: &User| {
        target
            .primary_role()
            .is_some_and(|primary| can_act(acting, primary))
    };

    match state.users().delete_if(id, &eligible) {
        Ok(removed) => {
            info!(user_id = %removed.id, requester = %acting, "User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            warn!(user_id = %id, requester = %acting, error = %err, "Delete user refused");
            Err(AppError::from(err))
        }
    }
}
