//! Password accounts and bearer-token sessions.
//!
//! Login issues an HS256 JWT whose subject is the user id. Handlers take an
//! [`AuthUser`] extractor and act as that user; no request body or query
//! string can name the acting user.

pub mod handlers;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::user::UserType;

pub const MIN_PASSWORD_LEN: usize = 6;
const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: Duration::hours(config.token_ttl_hours),
        }
    }
}

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub user_type: UserType,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    user_type: UserType,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_token(
    config: &AuthConfig,
    user_id: Uuid,
    user_type: UserType,
) -> Result<IssuedToken, AppError> {
    let now = Utc::now();
    let expires_at = now + config.token_ttl;
    let claims = Claims {
        sub: user_id,
        user_type,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign session token: {e}")))?;

    Ok(IssuedToken {
        token,
        token_type: "Bearer",
        expires_at,
    })
}

pub fn verify_token(config: &AuthConfig, token: &str) -> Result<AuthUser, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

    Ok(AuthUser {
        user_id: data.claims.sub,
        user_type: data.claims.user_type,
    })
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        verify_token(&config, token)
    }
}

/// Checks a new password against its confirmation and the length floor.
pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), AppError> {
    if password.is_empty() || confirm_password.is_empty() {
        return Err(AppError::Validation(
            "Password and confirmation are required".to_string(),
        ));
    }
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password should be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// bcrypt is CPU-bound, so hashing runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored password hash unreadable: {e}")))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl: Duration::hours(24),
        }
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_issued_token_identifies_user() {
        let config = config("test-secret");
        let user_id = Uuid::new_v4();

        let issued = issue_token(&config, user_id, UserType::Company).unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert!(issued.expires_at > Utc::now());

        let user = verify_token(&config, &issued.token).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.user_type, UserType::Company);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issued = issue_token(&config("secret-a"), Uuid::new_v4(), UserType::Seeker).unwrap();
        let err = verify_token(&config("secret-b"), &issued.token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = config("test-secret");
        let issued_at = Utc::now() - Duration::hours(3);
        let claims = Claims {
            sub: Uuid::new_v4(),
            user_type: UserType::Seeker,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&config, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("Expired")));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthorized(msg)) if msg.contains("Missing")
        ));
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_new_password_rules() {
        assert!(validate_new_password("hunter22", "hunter22").is_ok());

        let err = validate_new_password("hunter22", "hunter23").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Passwords do not match"));

        let err = validate_new_password("abc", "abc").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("at least 6")));

        assert!(validate_new_password("", "").is_err());
    }

    #[tokio::test]
    async fn test_password_hash_verifies_only_the_original() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, "correct horse");

        assert!(verify_password("correct horse".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong horse".to_string(), hash).await.unwrap());
    }
}
