// Centralized error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Wire format for error responses: `{ "code": ..., "msg": ... }`
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub msg: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Please pass username and password.")]
    MissingCredentials,

    #[error("Authentication failed. User not found.")]
    AuthUserNotFound,

    #[error("Authentication failed. Wrong password.")]
    WrongPassword,

    #[error("Too many failed login attempts. Try again later.")]
    TooManyAttempts,

    #[error("User not found.")]
    UserNotFound,

    #[error("Movie not found.")]
    MovieNotFound,

    #[error("Favourite already exists")]
    DuplicateFavourite,

    #[error("Favourite does not exist")]
    FavouriteNotFound,

    #[error("Username already taken.")]
    UsernameTaken,

    #[error("Invalid user id.")]
    InvalidUserId,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status for the variant.
    ///
    /// Login with an unknown username keeps the upstream wire behaviour:
    /// a 401 status carrying a 404 body code.
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ApiError::AuthUserNotFound => StatusCode::UNAUTHORIZED,
            ApiError::WrongPassword => StatusCode::UNAUTHORIZED,
            ApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::MovieNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateFavourite => StatusCode::CONFLICT,
            ApiError::FavouriteNotFound => StatusCode::NOT_FOUND,
            ApiError::UsernameTaken => StatusCode::CONFLICT,
            ApiError::InvalidUserId => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body code. Differs from the HTTP status only for AuthUserNotFound.
    fn body_code(&self) -> u16 {
        match self {
            ApiError::AuthUserNotFound => 404,
            other => other.status().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal errors are logged here and never leak detail on the wire
        if let ApiError::Internal(ref err) = self {
            tracing::error!(error = %err, "Internal server error");
        }

        let status = self.status();
        let body = ErrorBody {
            code: self.body_code(),
            msg: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
