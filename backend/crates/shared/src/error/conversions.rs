//! Error conversions
//!
//! Renders [`AppError`] as an RFC 7807 problem document when the `axum`
//! feature is enabled.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "code": self.code(),
            "context": self.detail(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    async fn body_of(err: AppError) -> (u16, serde_json::Value) {
        let response = err.into_response();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_problem_document_body() {
        let (status, body) = body_of(
            AppError::unprocessable("Username rejected")
                .with_code("RESERVED_SEQUENCE")
                .with_detail("NPC"),
        )
        .await;
        assert_eq!(status, 422);
        assert_eq!(body["title"], "Unprocessable Entity");
        assert_eq!(body["detail"], "Username rejected");
        assert_eq!(body["code"], "RESERVED_SEQUENCE");
        assert_eq!(body["context"], "NPC");
    }

    #[tokio::test]
    async fn test_absent_code_serializes_null() {
        let (status, body) = body_of(AppError::unauthorized("Authentication failed")).await;
        assert_eq!(status, 401);
        assert_eq!(body["type"], "https://httpstatuses.io/401");
        assert!(body["code"].is_null());
        assert!(body["context"].is_null());
    }
}
