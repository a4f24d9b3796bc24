use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// `None` leaves the reasoning service unconfigured; every AI feature then
    /// answers from its fallback path without attempting a call.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    /// HMAC key for session tokens.
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .context("TOKEN_TTL_HOURS must be a positive whole number of hours")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating an empty or blank value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_blank_is_none() {
        std::env::set_var("UWORK_TEST_BLANK_KEY", "   ");
        assert_eq!(optional_env("UWORK_TEST_BLANK_KEY"), None);
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("UWORK_TEST_SET_KEY", " sk-123 ");
        assert_eq!(optional_env("UWORK_TEST_SET_KEY").as_deref(), Some("sk-123"));
    }

    #[test]
    fn test_require_env_missing_names_variable() {
        let err = require_env("UWORK_TEST_DEFINITELY_MISSING").unwrap_err();
        assert!(err.to_string().contains("UWORK_TEST_DEFINITELY_MISSING"));
    }
}
