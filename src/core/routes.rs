// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // User collection: list, register/login
        .route(
            "/users",
            get(crate::handlers::users::list_users_handler)
                .post(crate::handlers::users::register_or_login_handler),
        )
        // Single user: lookup, delete, administrative update (by id)
        .route(
            "/users/{user_name}",
            get(crate::handlers::users::get_user_handler)
                .delete(crate::handlers::users::delete_user_handler)
                .put(crate::handlers::users::update_user_handler),
        )
        // Favourites of a user
        .route(
            "/users/{user_name}/favourites",
            get(crate::handlers::favourites::list_favourites_handler)
                .post(crate::handlers::favourites::add_favourite_handler)
                .delete(crate::handlers::favourites::remove_favourite_handler),
        )
        .route("/health", get(crate::handlers::health::health_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
