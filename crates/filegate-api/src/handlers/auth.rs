//! Auth handlers: credential exchange and token check.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use filegate_auth::{Credentials, IssuedToken};
use filegate_core::error::AppError;

use crate::dto::response::{ApiResponse, TokenValidationResponse};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// POST /api/auth/token
pub async fn token(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<IssuedToken>, ApiError> {
    let Json(credentials) =
        payload.map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let issued = state.issuer.issue(&credentials)?;
    Ok(Json(issued))
}

/// GET /api/auth/validate-token
pub async fn validate_token(
    principal: AuthPrincipal,
) -> Json<ApiResponse<TokenValidationResponse>> {
    Json(ApiResponse::ok(TokenValidationResponse {
        valid: true,
        subject: principal.subject.clone(),
        expires_at: principal.expires_at.to_rfc3339(),
    }))
}
