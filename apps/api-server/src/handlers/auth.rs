//! Session handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::ports::{AuthError, SessionGate};
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthResponse, LoginRequest, SessionStatusResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};

/// POST /api/auth/login
pub async fn login(
    gate: web::Data<Arc<dyn SessionGate>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    // Compare against the fixed administrator identity and issue a token
    let token = gate.login(&req.username, &req.password).map_err(|e| match e {
        AuthError::InvalidCredentials => AppError::Unauthorized,
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: gate.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/logout
///
/// Session tokens are stateless, so there is nothing to revoke here;
/// clearing the held credential is the client's job. Idempotent: succeeds
/// whether or not a session was presented.
pub async fn logout() -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Session cleared")))
}

/// GET /api/auth/check
///
/// Never fails: a missing or malformed token simply reads as
/// unauthenticated.
pub async fn check(identity: OptionalIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(SessionStatusResponse {
        authenticated: identity.0.is_some(),
    }))
}
