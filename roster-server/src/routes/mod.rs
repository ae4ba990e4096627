use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState,
    users::{role_handlers, user_handlers},
};

/// Create the user directory routes
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(user_handlers::list_users_handler).post(user_handlers::create_user_handler),
        )
        // Empty ID: listing for GET, unknown user otherwise
        .route(
            "/users/",
            get(user_handlers::list_users_handler)
                .delete(user_handlers::delete_unnamed_user_handler),
        )
        .route(
            "/users/{id}",
            get(user_handlers::get_user_handler).delete(user_handlers::delete_user_handler),
        )
        .route("/users/roles/", put(role_handlers::update_unnamed_user_roles_handler))
        .route("/users/roles/{id}", put(role_handlers::update_user_roles_handler))
}
