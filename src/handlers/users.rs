use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::payloads::{
    CredentialsRequest, MessageResponse, RegisterActionQuery, RegisteredResponse, TokenResponse,
    UpdateUserRequest,
};
use crate::models::user::UserResponse;
use crate::stores::user_store::CreateError;
use crate::utils::time::current_timestamp;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// List all users
///
/// GET /users
pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let users: Vec<UserResponse> = state
        .users
        .list_all()
        .iter()
        .map(UserResponse::from)
        .collect();

    (StatusCode::OK, Json(users))
}

/// Get a single user by username
///
/// GET /users/{userName}
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> Result<Response, ApiError> {
    let user = state
        .users
        .find_by_username(&user_name)
        .ok_or(ApiError::UserNotFound)?;

    // 201 on reads is inherited wire behaviour
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))).into_response())
}

/// Delete a single user by username
///
/// DELETE /users/{userName}
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> Response {
    let user = match state.users.find_by_username(&user_name) {
        Some(user) => user,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse {
                    success: false,
                    msg: format!("{user_name} not found"),
                }),
            )
                .into_response();
        }
    };

    state.users.delete_by_id(user.id);

    info!(username = %user_name, "User deleted");

    (
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            msg: format!("{user_name} deleted"),
        }),
    )
        .into_response()
}

/// Register a new user or authenticate an existing one.
///
/// POST /users?action=register  — create an account
/// POST /users                  — authenticate, returns a bearer token
pub async fn register_or_login_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegisterActionQuery>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Response, ApiError> {
    // Both fields required and non-empty, checked before any lookup
    let username = body.username.filter(|u| !u.is_empty());
    let password = body.password.filter(|p| !p.is_empty());
    let (username, password) = match (username, password) {
        (Some(username), Some(password)) => (username, password),
        _ => return Err(ApiError::MissingCredentials),
    };

    if query.action.as_deref() == Some("register") {
        let hash = state.auth.hash_password(&password)?;

        state
            .users
            .create(&username, hash)
            .map_err(|CreateError::UsernameTaken| ApiError::UsernameTaken)?;

        info!(username = %username, "User registered");

        return Ok((
            StatusCode::CREATED,
            Json(RegisteredResponse {
                code: 201,
                msg: "Successful created new user.".to_string(),
            }),
        )
            .into_response());
    }

    let now = current_timestamp();
    if state.login_limiter.is_limited(&username, now) {
        warn!(username = %username, "Login attempts throttled");
        return Err(ApiError::TooManyAttempts);
    }

    // Only failed attempts consume the budget; successful logins are free
    let token = state
        .auth
        .authenticate(&state.users, &username, &password)
        .inspect_err(|_| state.login_limiter.record_failure(&username, now))?;

    Ok((
        StatusCode::OK,
        Json(TokenResponse {
            success: true,
            token,
        }),
    )
        .into_response())
}

/// Apply a partial administrative update to a user.
/// The path parameter is the user id; the id itself is immutable.
///
/// PUT /users/{id}
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let id: Uuid = id.parse().map_err(|_| ApiError::InvalidUserId)?;

    if matches!(body.username.as_deref(), Some(""))
        || matches!(body.password.as_deref(), Some(""))
    {
        return Err(ApiError::MissingCredentials);
    }

    let new_hash = match body.password {
        Some(ref password) => Some(state.auth.hash_password(password)?),
        None => None,
    };

    let updated = state
        .users
        .update(id, body.username, new_hash)
        .map_err(|CreateError::UsernameTaken| ApiError::UsernameTaken)?
        .ok_or(ApiError::UserNotFound)?;

    info!(user_id = %id, "User updated");

    Ok((StatusCode::OK, Json(UserResponse::from(&updated))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AuthConfig, Config, LoggingConfig, ServerConfig};
    use http_body_util::BodyExt;

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                port: 8080,
                num_threads: 2,
                request_timeout: 5,
            },
            auth: AuthConfig {
                secret: "test-secret".to_string(),
                bcrypt_cost: 4,
                max_login_attempts_per_minute: 3,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                console: true,
            },
        }
    }

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(create_test_config()))
    }

    fn state_with_alice() -> Arc<AppState> {
        let state = create_test_state();
        let hash = state.auth.hash_password("secret123").unwrap();
        state.users.create("alice", hash).unwrap();
        state
    }

    fn credentials(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = state_with_alice();

        let response = list_users_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let users: Vec<UserResponse> = body_json(response).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let state = state_with_alice();

        let response = get_user_handler(State(state), Path("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let user: UserResponse = body_json(response).await;
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let state = state_with_alice();

        let result = get_user_handler(State(state), Path("bob".to_string())).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let state = state_with_alice();

        let response =
            delete_user_handler(State(state.clone()), Path("alice".to_string())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        assert!(state.users.find_by_username("alice").is_none());
    }

    #[tokio::test]
    async fn test_delete_user_not_found_is_401() {
        let state = state_with_alice();

        let response = delete_user_handler(State(state), Path("bob".to_string())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: MessageResponse = body_json(response).await;
        assert!(!body.success);
        assert_eq!(body.msg, "bob not found");
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = create_test_state();

        let response = register_or_login_handler(
            State(state.clone()),
            Query(RegisterActionQuery {
                action: Some("register".to_string()),
            }),
            Json(credentials("alice", "secret123")),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: RegisteredResponse = body_json(response).await;
        assert_eq!(body.code, 201);

        // The stored hash is bcrypt, not the plaintext
        let alice = state.users.find_by_username("alice").unwrap();
        assert_ne!(alice.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflict() {
        let state = state_with_alice();

        let result = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery {
                action: Some("register".to_string()),
            }),
            Json(credentials("alice", "other")),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_401() {
        let state = create_test_state();

        let result = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery {
                action: Some("register".to_string()),
            }),
            Json(CredentialsRequest {
                username: Some("alice".to_string()),
                password: None,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_success_returns_bearer_token() {
        let state = state_with_alice();

        let response = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery { action: None }),
            Json(credentials("alice", "secret123")),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: TokenResponse = body_json(response).await;
        assert!(body.success);
        assert!(body.token.starts_with("BEARER "));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let state = state_with_alice();

        let result = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery { action: None }),
            Json(credentials("alice", "wrong")),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_401_with_404_body_code() {
        use crate::core::error::ErrorBody;

        let state = state_with_alice();

        let result = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery { action: None }),
            Json(credentials("bob", "x")),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.code, 404);
    }

    #[tokio::test]
    async fn test_login_throttled_after_failed_attempts() {
        let state = state_with_alice();

        // Config allows 3 failed attempts per minute
        for _ in 0..3 {
            let _ = register_or_login_handler(
                State(state.clone()),
                Query(RegisterActionQuery { action: None }),
                Json(credentials("alice", "wrong")),
            )
            .await;
        }

        let result = register_or_login_handler(
            State(state),
            Query(RegisterActionQuery { action: None }),
            Json(credentials("alice", "secret123")),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_successful_logins_do_not_consume_the_budget() {
        let state = state_with_alice();

        // More successful logins than the per-minute failure budget
        for _ in 0..5 {
            let response = register_or_login_handler(
                State(state.clone()),
                Query(RegisterActionQuery { action: None }),
                Json(credentials("alice", "secret123")),
            )
            .await
            .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_update_user_password() {
        let state = state_with_alice();
        let alice = state.users.find_by_username("alice").unwrap();

        let response = update_user_handler(
            State(state.clone()),
            Path(alice.id.to_string()),
            Json(UpdateUserRequest {
                username: None,
                password: Some("newpass".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Old password no longer works, new one does
        assert!(state
            .auth
            .authenticate(&state.users, "alice", "secret123")
            .is_err());
        assert!(state
            .auth
            .authenticate(&state.users, "alice", "newpass")
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_user_malformed_id_is_400() {
        let state = state_with_alice();

        let result = update_user_handler(
            State(state),
            Path("not-a-uuid".to_string()),
            Json(UpdateUserRequest {
                username: None,
                password: None,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_user_unknown_id_is_404() {
        let state = state_with_alice();

        let result = update_user_handler(
            State(state),
            Path(Uuid::new_v4().to_string()),
            Json(UpdateUserRequest {
                username: Some("alicia".to_string()),
                password: None,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
