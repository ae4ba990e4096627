//! Role assignment endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use roster_core::{DirectoryError, RoleUpdateRequest, can_act_on_all};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::infra::{app_state::AppState, errors::AppResult, payload::JsonPayload};
use crate::users::requester::Requester;

pub const ROLES_UPDATED: &str = "User roles updated successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Replace a user's role set
///
/// Permission is judged on the roles being assigned; the target's current
/// roles are not consulted.
pub async fn update_user_roles_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
    JsonPayload(request): JsonPayload<RoleUpdateRequest>,
) -> AppResult<Json<MessageResponse>> {
    update_roles(&state, &requester, &id, request)
}

/// `PUT /users/roles/` names no user and is answered like an unknown ID
pub async fn update_unnamed_user_roles_handler(
    State(state): State<AppState>,
    requester: Requester,
    JsonPayload(request): JsonPayload<RoleUpdateRequest>,
) -> AppResult<Json<MessageResponse>> {
    update_roles(&state, &requester, "", request)
}

fn update_roles(
    state: &AppState,
    requester: &Requester,
    id: &str,
    request: RoleUpdateRequest,
) -> AppResult<Json<MessageResponse>> {
    let acting = requester.require_role().inspect_err(|_| {
        warn!(
            requester = %requester.asserted,
            "Forbidden: unknown role attempted to update roles"
        );
    })?;

    let roles = request.parse_roles().inspect_err(|err| {
        warn!(user_id = %id, error = %err, "BadRequest: update roles");
    })?;

    if !can_act_on_all(acting, &roles) {
        warn!(
            user_id = %id,
            requester = %acting,
            roles = ?roles,
            "Forbidden: role not permitted to assign requested roles"
        );
        return Err(DirectoryError::InsufficientPermissions.into());
    }

    state.users().update_roles(id, roles).inspect_err(|err| {
        warn!(user_id = %id, error = %err, "NotFound: update roles");
    })?;

    info!(user_id = %id, requester = %acting, "User roles updated");
    Ok(Json(MessageResponse {
        message: ROLES_UPDATED.to_string(),
    }))
}
