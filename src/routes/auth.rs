/// Authentication Routes
///
/// Login issues a signed session token for a verified principal; logout
/// revokes the presented token; the current-principal route shows what
/// the gate attaches for downstream handlers.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{issue_token, verify_password, Claims, SESSION_LIFETIME_SECS};
use crate::configuration::AuthSettings;
use crate::credentials::CredentialStore;
use crate::error::{AppError, AuthError, ErrorContext};
use crate::middleware::extract_bearer_token;
use crate::revocation::{RevocationLedger, REVOCATION_TTL};
use crate::validators::is_valid_email;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session issuance response
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct PrincipalResponse {
    pub principal_id: i64,
}

/// POST /auth/login
///
/// Authenticates with email and password and returns a session token.
///
/// # Errors
/// - 400: invalid email format
/// - 401: unknown email or wrong password (indistinguishable, preventing
///   user enumeration)
/// - 500: credential store failure, signing failure, missing secret
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<Arc<dyn CredentialStore>>,
    settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("login");

    let email = is_valid_email(&form.email)?;

    let credential = store
        .lookup(&email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    if !verify_password(&form.password, &credential.password_hash)? {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let token = issue_token(credential.principal_id, settings.get_ref())?;

    tracing::info!(
        request_id = %context.request_id,
        principal_id = credential.principal_id,
        "Session issued"
    );

    Ok(HttpResponse::Ok().json(SessionResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: SESSION_LIFETIME_SECS,
    }))
}

/// DELETE /auth/logout
///
/// Revokes the presented token. Gate-protected, so the token reaching
/// this handler is well-formed, unrevoked and valid; afterwards it is
/// rejected on every protected route until it would have expired anyway.
///
/// # Errors
/// - 500: revocation ledger failure (the token stays valid; the client
///   should retry)
pub async fn logout(
    req: HttpRequest,
    ledger: web::Data<Arc<dyn RevocationLedger>>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("logout");

    let token = extract_bearer_token(req.headers())?;
    ledger.revoke(&token, REVOCATION_TTL).await?;

    tracing::info!(request_id = %context.request_id, "Session revoked");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logout successful"
    })))
}

/// GET /auth/me
///
/// Returns the principal id attached to the request by the gate.
pub async fn current_principal(claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PrincipalResponse {
        principal_id: claims.sub,
    }))
}
