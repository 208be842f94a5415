//! Domain entities for the Accounts domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_auth::UserRole;
use mimo_common::{Error, Result};

/// Maximum display name length (varchar(100))
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Maximum avatar URL length (varchar(2048))
const MAX_AVATAR_URL_LENGTH: usize = 2048;

/// Profile entity — one row per authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub suspended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile for a freshly registered account
    pub fn new(id: Uuid, email: String, display_name: Option<String>) -> Result<Self> {
        if email.is_empty() {
            return Err(Error::Validation("Email is required".to_string()));
        }
        if let Some(ref name) = display_name {
            Self::validate_display_name(name)?;
        }

        let now = Utc::now();
        Ok(Profile {
            id,
            email,
            display_name,
            avatar_url: None,
            role: UserRole::Client,
            suspended_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate a display name (non-blank, varchar(100))
    pub fn validate_display_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation(
                "Display name cannot be blank".to_string(),
            ));
        }
        if name.len() > MAX_DISPLAY_NAME_LENGTH {
            return Err(Error::Validation(format!(
                "Display name must be at most {} characters",
                MAX_DISPLAY_NAME_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate an avatar URL (https, varchar(2048))
    pub fn validate_avatar_url(url: &str) -> Result<()> {
        if !url.starts_with("https://") {
            return Err(Error::Validation("Avatar URL must be HTTPS".to_string()));
        }
        if url.len() > MAX_AVATAR_URL_LENGTH {
            return Err(Error::Validation(format!(
                "Avatar URL must be at most {} characters",
                MAX_AVATAR_URL_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_creation_defaults_to_client() {
        let id = Uuid::new_v4();
        let profile = Profile::new(id, "ana@example.com".to_string(), None).unwrap();

        assert_eq!(profile.id, id);
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.role, UserRole::Client);
        assert!(profile.suspended_at.is_none());
        assert!(profile.display_name.is_none());
    }

    #[test]
    fn test_profile_creation_empty_email_rejected() {
        let result = Profile::new(Uuid::new_v4(), "".to_string(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_blank_rejected() {
        assert!(Profile::validate_display_name("   ").is_err());
        assert!(Profile::validate_display_name("").is_err());
    }

    #[test]
    fn test_display_name_100_chars_valid() {
        let name = "a".repeat(100);
        assert!(Profile::validate_display_name(&name).is_ok());
    }

    #[test]
    fn test_display_name_101_chars_rejected() {
        let name = "a".repeat(101);
        let result = Profile::validate_display_name(&name);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 100"));
    }

    #[test]
    fn test_avatar_url_must_be_https() {
        assert!(Profile::validate_avatar_url("http://cdn.example.com/a.png").is_err());
        assert!(Profile::validate_avatar_url("https://cdn.example.com/a.png").is_ok());
    }

    #[test]
    fn test_avatar_url_length_limit() {
        let url = format!("https://cdn.example.com/{}", "a".repeat(2048));
        assert!(Profile::validate_avatar_url(&url).is_err());
    }

    #[test]
    fn test_profile_serialization_roundtrip() {
        let profile = Profile::new(
            Uuid::new_v4(),
            "ana@example.com".to_string(),
            Some("Ana".to_string()),
        )
        .unwrap();

        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: Profile = serde_json::from_str(&json).unwrap();

        assert_eq!(profile.id, deserialized.id);
        assert_eq!(profile.email, deserialized.email);
        assert_eq!(profile.role, deserialized.role);
    }
}
