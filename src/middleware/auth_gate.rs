/// Request Gate Middleware
///
/// Guards protected routes. Each request runs a fixed pipeline: extract
/// the bearer token, consult the revocation ledger, verify the token,
/// then attach the decoded claims to the request extensions for route
/// handlers. The ledger is consulted before cryptographic verification so
/// that revocation takes precedence over otherwise-valid tokens, and a
/// ledger failure rejects the request rather than admitting it.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::auth::verify_token;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError, TokenError};
use crate::revocation::RevocationLedger;

/// Pull the bearer token out of the `Authorization` header.
///
/// Accepts only the literal two-part `Bearer <token>` form with a
/// non-empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = match headers.get(header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::Auth(AuthError::InvalidHeaderFormat))?,
        None => return Err(AppError::Auth(AuthError::MissingHeader)),
    };

    if raw.is_empty() {
        return Err(AppError::Auth(AuthError::MissingHeader));
    }

    let parts: Vec<&str> = raw.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AppError::Auth(AuthError::InvalidHeaderFormat));
    }

    if parts[1].is_empty() {
        return Err(AppError::Auth(AuthError::EmptyToken));
    }

    Ok(parts[1].to_string())
}

/// Authentication gate for protected routes.
pub struct AuthGate {
    settings: AuthSettings,
    ledger: Arc<dyn RevocationLedger>,
}

impl AuthGate {
    pub fn new(settings: AuthSettings, ledger: Arc<dyn RevocationLedger>) -> Self {
        Self { settings, ledger }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
            settings: self.settings.clone(),
            ledger: self.ledger.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
    settings: AuthSettings,
    ledger: Arc<dyn RevocationLedger>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let settings = self.settings.clone();
        let ledger = self.ledger.clone();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(req.headers()) {
                Ok(token) => token,
                Err(e) => return Err(e.into()),
            };

            // Revocation first: a revoked token must be rejected even
            // though it would still pass signature, expiry and issuer
            // checks.
            match ledger.is_revoked(&token).await {
                Ok(false) => {}
                Ok(true) => {
                    tracing::warn!("Rejected revoked token");
                    return Err(AppError::Auth(AuthError::Revoked).into());
                }
                // An unreachable ledger must not admit a possibly revoked
                // token.
                Err(e) => return Err(AppError::Ledger(e).into()),
            }

            let claims = match verify_token(&token, &settings) {
                Ok(claims) => claims,
                Err(AppError::Token(TokenError::Expired))
                | Err(AppError::Token(TokenError::IssuerMismatch)) => {
                    return Err(AppError::Auth(AuthError::SessionInvalid).into());
                }
                Err(e) => return Err(e.into()),
            };

            tracing::debug!(principal_id = claims.sub, "Request admitted");
            req.extensions_mut().insert(claims);

            service.call(req).await
        })
    }
}
