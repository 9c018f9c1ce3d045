use actix_web::{dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors that can occur while authenticating a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Token verifier not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            message: match self {
                AuthError::InvalidToken(e) => e.to_string(),
                _ => self.to_string(),
            },
            status_code: status.as_u16(),
        })
    }
}

/// Account type carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sme,
    Specialist,
    Admin,
}

/// JWT claims issued by the main application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "userType")]
    pub user_type: Role,
    pub exp: usize,
}

/// HS256 token verifier sharing the main application's secret
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Sign claims with the shared secret
    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }
}

/// Caller identity extracted from the `Authorization: Bearer` header
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn require_role(&self, roles: &[Role]) -> Result<(), AuthError> {
        if roles.contains(&self.0.user_type) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let verifier = req
        .app_data::<web::Data<JwtVerifier>>()
        .ok_or(AuthError::NotConfigured)?;

    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = verifier.verify(token)?;
    tracing::debug!("Authenticated {} as {:?}", claims.user_id, claims.user_type);

    Ok(AuthenticatedUser(claims))
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, exp: usize) -> Claims {
        Claims {
            user_id: "user_1".to_string(),
            email: "sme1@test.com".to_string(),
            user_type: role,
            exp,
        }
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_issue_and_verify() {
        let verifier = JwtVerifier::new("test-secret");
        let token = verifier.issue(&claims(Role::Sme, future_exp())).unwrap();

        let decoded = verifier.verify(&token).unwrap();
        assert_eq!(decoded.user_type, Role::Sme);
        assert_eq!(decoded.user_id, "user_1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtVerifier::new("one").issue(&claims(Role::Sme, future_exp())).unwrap();
        let result = JwtVerifier::new("two").verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = verifier.issue(&claims(Role::Sme, expired)).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_role_check() {
        let user = AuthenticatedUser(claims(Role::Specialist, future_exp()));
        assert!(user.require_role(&[Role::Specialist]).is_ok());
        assert!(matches!(user.require_role(&[Role::Sme]), Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
