use crate::core::error::ErrorBody;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};

/// 404 for unmatched routes, same JSON error shape as the rest of the API
pub async fn fallback_handler(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            code: 404,
            msg: format!("No route for {}", uri.path()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_is_404() {
        let response = fallback_handler("/no/such/route".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
