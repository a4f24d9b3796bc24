use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which side of the marketplace an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Seeker,
    Company,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Seeker => "seeker",
            UserType::Company => "company",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "seeker" => Some(UserType::Seeker),
            "company" => Some(UserType::Company),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn kind(&self) -> Option<UserType> {
        UserType::parse(&self.user_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_round_trips_through_str() {
        for kind in [UserType::Seeker, UserType::Company] {
            assert_eq!(UserType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(UserType::parse("admin"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = UserRow {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            user_type: "seeker".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_user_type_serde_is_snake_case() {
        let kind: UserType = serde_json::from_str(r#""company""#).unwrap();
        assert_eq!(kind, UserType::Company);
    }
}
