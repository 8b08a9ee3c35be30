use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::movie::Movie;
use crate::models::payloads::{FavouriteRequest, MessageResponse};
use crate::models::user::UserResponse;
use crate::stores::user_store::FavouriteError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

/// List a user's favourites as full movie records, in insertion order
///
/// GET /users/{userName}/favourites
pub async fn list_favourites_handler(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> Result<Response, ApiError> {
    let user = state
        .users
        .find_by_username(&user_name)
        .ok_or(ApiError::UserNotFound)?;

    let movies: Vec<Movie> = state.movies.resolve_all(&user.favourites);

    Ok((StatusCode::CREATED, Json(movies)).into_response())
}

/// Add a movie to a user's favourites.
/// The body carries the external catalog id of the movie.
///
/// POST /users/{userName}/favourites
pub async fn add_favourite_handler(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
    Json(body): Json<FavouriteRequest>,
) -> Result<Response, ApiError> {
    let movie = state
        .movies
        .find_by_external_id(&body.id)
        .ok_or(ApiError::MovieNotFound)?;

    // The membership check and the append are one atomic store operation
    let updated = state
        .users
        .add_favourite(&user_name, movie.id)
        .map_err(|err| match err {
            FavouriteError::UserMissing => ApiError::UserNotFound,
            FavouriteError::AlreadyPresent => ApiError::DuplicateFavourite,
            FavouriteError::NotPresent => ApiError::Internal(anyhow::anyhow!(
                "unexpected NotPresent from add_favourite"
            )),
        })?;

    info!(
        username = %user_name,
        external_id = %body.id,
        movie_id = %movie.id,
        "Favourite added"
    );

    // The full favourites set is echoed back, matching the observed contract
    Ok((StatusCode::CREATED, Json(UserResponse::from(&updated))).into_response())
}

/// Remove a movie from a user's favourites.
///
/// DELETE /users/{userName}/favourites
///
/// A missing movie is reported before a missing user, regardless of which
/// is actually absent.
pub async fn remove_favourite_handler(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
    Json(body): Json<FavouriteRequest>,
) -> Result<Response, ApiError> {
    let movie = state
        .movies
        .find_by_external_id(&body.id)
        .ok_or(ApiError::MovieNotFound)?;

    state
        .users
        .remove_favourite(&user_name, movie.id)
        .map_err(|err| match err {
            FavouriteError::UserMissing => ApiError::UserNotFound,
            FavouriteError::NotPresent => ApiError::FavouriteNotFound,
            FavouriteError::AlreadyPresent => ApiError::Internal(anyhow::anyhow!(
                "unexpected AlreadyPresent from remove_favourite"
            )),
        })?;

    info!(
        username = %user_name,
        external_id = %body.id,
        movie_id = %movie.id,
        "Favourite removed"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            msg: "favourite deleted".to_string(),
        }),
    )
        .into_response())
}
