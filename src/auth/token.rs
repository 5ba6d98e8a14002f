/// Token Signing and Verification
///
/// Issues compact HS256-signed session tokens and verifies presented
/// tokens back into trusted claims.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::AuthSettings;
use crate::error::{AppError, TokenError};

/// Issue a signed session token for an authenticated principal.
///
/// # Errors
/// Returns a configuration error when no signing secret is set, or an
/// internal error when encoding fails.
pub fn issue_token(principal_id: i64, settings: &AuthSettings) -> Result<String, AppError> {
    let secret = settings.signing_secret()?;
    let claims = Claims::new(principal_id, settings.issuer.clone());

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Verify a presented token and extract its claims.
///
/// Checks run in a fixed order: signature and structure first, then
/// expiry, then issuer. Expiry and issuer are only evaluated once the
/// signature is known good, so a mismatched issuer is never reported for
/// unsigned garbage.
pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, AppError> {
    let secret = settings.signing_secret()?;

    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry and issuer are checked explicitly below.
    validation.validate_exp = false;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::warn!("Token failed signature or structural checks: {}", e);
        TokenError::MalformedOrTampered
    })?;

    let claims = decoded.claims;

    if claims.exp <= Utc::now().timestamp() {
        return Err(TokenError::Expired.into());
    }

    if claims.iss != settings.issuer {
        return Err(TokenError::IssuerMismatch.into());
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> AuthSettings {
        AuthSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "test".to_string(),
        }
    }

    fn sign_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign claims")
    }

    #[test]
    fn issued_token_round_trips() {
        let settings = test_settings();

        let token = issue_token(7, &settings).expect("Failed to issue token");
        let claims = verify_token(&token, &settings).expect("Failed to verify token");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.iss, "test");
    }

    #[test]
    fn missing_secret_is_a_configuration_error() {
        let settings = AuthSettings {
            secret: String::new(),
            issuer: "test".to_string(),
        };

        let result = issue_token(7, &settings);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let settings = test_settings();
        let token = issue_token(7, &settings).expect("Failed to issue token");

        let tampered = format!("{}X", token);
        let result = verify_token(&tampered, &settings);

        assert!(matches!(
            result,
            Err(AppError::Token(TokenError::MalformedOrTampered))
        ));
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        let settings = test_settings();
        let claims = Claims::new(7, settings.issuer.clone());
        let token = sign_raw(&claims, "a-completely-different-secret-string");

        let result = verify_token(&token, &settings);

        assert!(matches!(
            result,
            Err(AppError::Token(TokenError::MalformedOrTampered))
        ));
    }

    #[test]
    fn expired_token_is_rejected_despite_valid_signature() {
        let settings = test_settings();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            exp: now - 60,
            iat: now - 120,
            iss: settings.issuer.clone(),
        };
        let token = sign_raw(&claims, &settings.secret);

        let result = verify_token(&token, &settings);

        assert!(matches!(result, Err(AppError::Token(TokenError::Expired))));
    }

    #[test]
    fn wrong_issuer_is_rejected_despite_valid_signature() {
        let settings = test_settings();
        let claims = Claims::new(7, "another-deployment".to_string());
        let token = sign_raw(&claims, &settings.secret);

        let result = verify_token(&token, &settings);

        assert!(matches!(
            result,
            Err(AppError::Token(TokenError::IssuerMismatch))
        ));
    }

    #[test]
    fn expiry_is_checked_before_issuer() {
        // A token that is both expired and mis-issued reports expiry.
        let settings = test_settings();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            exp: now - 60,
            iat: now - 120,
            iss: "another-deployment".to_string(),
        };
        let token = sign_raw(&claims, &settings.secret);

        let result = verify_token(&token, &settings);

        assert!(matches!(result, Err(AppError::Token(TokenError::Expired))));
    }
}
