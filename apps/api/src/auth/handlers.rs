use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, issue_token, validate_new_password, verify_password, IssuedToken};
use crate::db::{self, is_unique_violation};
use crate::errors::AppError;
use crate::models::user::{UserRow, UserType};
use crate::state::AppState;

const INVALID_LOGIN: &str = "Invalid email or password";

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub user_type: String,
}

/// Validated registration input. The email is stored lowercased.
#[derive(Debug, PartialEq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub user_type: UserType,
}

pub fn validate_registration(req: &RegisterRequest) -> Result<NewAccount, AppError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "Username and email are required".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!("Invalid email address: {email}")));
    }
    validate_new_password(&req.password, &req.confirm_password)?;
    let user_type = UserType::parse(&req.user_type).ok_or_else(|| {
        AppError::Validation(format!(
            "user_type must be 'seeker' or 'company', got '{}'",
            req.user_type
        ))
    })?;

    Ok(NewAccount {
        username: username.to_string(),
        email: email.to_lowercase(),
        user_type,
    })
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    let account = validate_registration(&req)?;
    let password_hash = hash_password(req.password).await?;

    let user = db::users::create_user(
        &state.db,
        &account.username,
        &account.email,
        &password_hash,
        account.user_type,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Username or email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    info!("Registered {} user {}", account.user_type.as_str(), user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: UserRow,
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password get the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_LOGIN.to_string()))?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        warn!("Failed login for user {}", user.id);
        return Err(AppError::Unauthorized(INVALID_LOGIN.to_string()));
    }

    let user_type = user.kind().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "User {} has unknown user_type '{}'",
            user.id,
            user.user_type
        ))
    })?;
    let token = issue_token(&state.auth, user.id, user_type)?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse { token, user }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, confirm: &str, user_type: &str) -> RegisterRequest {
        RegisterRequest {
            username: " ada ".to_string(),
            email: "Ada@Example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            user_type: user_type.to_string(),
        }
    }

    #[test]
    fn test_registration_normalizes_account() {
        let account = validate_registration(&request("hunter22", "hunter22", "seeker")).unwrap();
        assert_eq!(
            account,
            NewAccount {
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                user_type: UserType::Seeker,
            }
        );
    }

    #[test]
    fn test_registration_checks_password_before_type() {
        let err = validate_registration(&request("hunter22", "hunter2", "admin")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Passwords do not match"));

        let err = validate_registration(&request("hunter22", "hunter22", "admin")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("user_type")));
    }

    #[test]
    fn test_register_body_uses_snake_case_confirmation() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"acme","email":"hr@acme.io","password":"secret1",
                "confirm_password":"secret1","user_type":"company"}"#,
        )
        .unwrap();
        let account = validate_registration(&req).unwrap();
        assert_eq!(account.user_type, UserType::Company);
    }
}
