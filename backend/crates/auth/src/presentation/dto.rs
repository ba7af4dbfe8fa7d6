//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::username::{RejectionCode, UsernameRejection};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
}

/// Sign up response
///
/// `token` goes into `Authorization: Bearer <token>` on later requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub username: String,
    pub token: String,
}

// ============================================================================
// Current User
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub username: String,
}

// ============================================================================
// Username Check
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameCheckRequest {
    pub username: String,
}

/// Policy verdict for a candidate username
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameCheckResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<RejectionCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<Result<(), UsernameRejection>> for UsernameCheckResponse {
    fn from(result: Result<(), UsernameRejection>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                code: None,
                detail: None,
            },
            Err(rejection) => Self {
                ok: false,
                code: Some(rejection.code()),
                detail: rejection.detail(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_response_shape() {
        let ok = serde_json::to_value(UsernameCheckResponse::from(Ok(()))).unwrap();
        assert_eq!(ok, serde_json::json!({ "ok": true }));

        let rejected = UsernameCheckResponse::from(Err(UsernameRejection::ContainsTerm {
            term: "RUDE".into(),
        }));
        assert_eq!(
            serde_json::to_value(rejected).unwrap(),
            serde_json::json!({ "ok": false, "code": "CONTAINS_TERM", "detail": "RUDE" })
        );
    }
}
