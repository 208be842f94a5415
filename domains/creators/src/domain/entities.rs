//! Domain entities for the Creators domain
//!
//! Creator profiles and their sub-resources (paid services, gallery,
//! posts). Each entity includes validation and serialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_common::{Error, Result};

/// Creator availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "creator_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CreatorStatus {
    Online,
    Busy,
    #[default]
    Offline,
}

impl std::fmt::Display for CreatorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatorStatus::Online => write!(f, "online"),
            CreatorStatus::Busy => write!(f, "busy"),
            CreatorStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Handle length bounds
const MIN_HANDLE_LENGTH: usize = 3;
const MAX_HANDLE_LENGTH: usize = 30;

/// Maximum display name length (varchar(100))
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Maximum bio length (CHECK length <= 2000)
const MAX_BIO_LENGTH: usize = 2000;

/// Maximum city length (varchar(100))
const MAX_CITY_LENGTH: usize = 100;

/// Maximum media URL length (varchar(2048))
const MAX_URL_LENGTH: usize = 2048;

/// Minimum chargeable BRL amount
pub const MIN_PRICE_BRL: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Maximum chargeable BRL amount
pub const MAX_PRICE_BRL: Decimal = Decimal::from_parts(500_000, 0, 0, false, 2);

fn validate_price(price: Decimal) -> Result<()> {
    if price < MIN_PRICE_BRL || price > MAX_PRICE_BRL {
        return Err(Error::Validation(format!(
            "Price must be between {} and {} BRL",
            MIN_PRICE_BRL, MAX_PRICE_BRL
        )));
    }
    Ok(())
}

fn validate_https_url(url: &str, field: &str) -> Result<()> {
    if !url.starts_with("https://") {
        return Err(Error::Validation(format!("{} must be HTTPS", field)));
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_URL_LENGTH
        )));
    }
    Ok(())
}

/// Creator entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Creator {
    pub id: Uuid,
    pub user_id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub status: CreatorStatus,
    pub price_per_message: Decimal,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Creator {
    /// Create a new creator profile
    pub fn new(
        user_id: Uuid,
        handle: String,
        display_name: String,
        price_per_message: Decimal,
    ) -> Result<Self> {
        Self::validate_handle(&handle)?;
        Self::validate_display_name(&display_name)?;
        validate_price(price_per_message)?;

        let now = Utc::now();
        Ok(Creator {
            id: Uuid::new_v4(),
            user_id,
            handle,
            display_name,
            bio: None,
            status: CreatorStatus::default(),
            price_per_message,
            city: None,
            avatar_url: None,
            cover_url: None,
            suspended_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate a handle: lowercase letters, digits, underscores, 3-30 chars
    pub fn validate_handle(handle: &str) -> Result<()> {
        if handle.len() < MIN_HANDLE_LENGTH || handle.len() > MAX_HANDLE_LENGTH {
            return Err(Error::Validation(format!(
                "Handle must be {}-{} characters",
                MIN_HANDLE_LENGTH, MAX_HANDLE_LENGTH
            )));
        }
        if !handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(Error::Validation(
                "Handle may only contain lowercase letters, digits and underscores".to_string(),
            ));
        }
        Ok(())
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

    /// Validate a bio (CHECK length <= 2000)
    pub fn validate_bio(bio: &str) -> Result<()> {
        if bio.len() > MAX_BIO_LENGTH {
            return Err(Error::Validation(format!(
                "Bio must be at most {} characters",
                MAX_BIO_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate a city (varchar(100))
    pub fn validate_city(city: &str) -> Result<()> {
        if city.len() > MAX_CITY_LENGTH {
            return Err(Error::Validation(format!(
                "City must be at most {} characters",
                MAX_CITY_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate a price update
    pub fn validate_price(price: Decimal) -> Result<()> {
        validate_price(price)
    }

    /// Validate an avatar or cover URL
    pub fn validate_media_url(url: &str) -> Result<()> {
        validate_https_url(url, "Media URL")
    }

    /// Check if the creator is suspended
    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }
}

/// A paid service/package defined by a creator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreatorService {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maximum service title length (varchar(120))
const MAX_SERVICE_TITLE_LENGTH: usize = 120;

/// Maximum service description length (CHECK length <= 2000)
const MAX_SERVICE_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum delivery window in days
const MAX_DELIVERY_DAYS: i32 = 60;

impl CreatorService {
    /// Create a new service
    pub fn new(
        creator_id: Uuid,
        title: String,
        description: Option<String>,
        price: Decimal,
        delivery_days: i32,
    ) -> Result<Self> {
        Self::validate_title(&title)?;
        if let Some(ref d) = description {
            Self::validate_description(d)?;
        }
        validate_price(price)?;
        Self::validate_delivery_days(delivery_days)?;

        let now = Utc::now();
        Ok(CreatorService {
            id: Uuid::new_v4(),
            creator_id,
            title,
            description,
            price,
            delivery_days,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate a service title (non-blank, varchar(120))
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::Validation("Title cannot be blank".to_string()));
        }
        if title.len() > MAX_SERVICE_TITLE_LENGTH {
            return Err(Error::Validation(format!(
                "Title must be at most {} characters",
                MAX_SERVICE_TITLE_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate a service description (CHECK length <= 2000)
    pub fn validate_description(description: &str) -> Result<()> {
        if description.len() > MAX_SERVICE_DESCRIPTION_LENGTH {
            return Err(Error::Validation(format!(
                "Description must be at most {} characters",
                MAX_SERVICE_DESCRIPTION_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate a delivery window (CHECK delivery_days BETWEEN 1 AND 60)
    pub fn validate_delivery_days(days: i32) -> Result<()> {
        if !(1..=MAX_DELIVERY_DAYS).contains(&days) {
            return Err(Error::Validation(format!(
                "Delivery window must be between 1 and {} days",
                MAX_DELIVERY_DAYS
            )));
        }
        Ok(())
    }
}

/// A gallery item with an explicit position for drag-and-drop ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GalleryItem {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub media_url: String,
    pub caption: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Maximum gallery caption length (varchar(200))
const MAX_CAPTION_LENGTH: usize = 200;

impl GalleryItem {
    /// Create a new gallery item; position is assigned on insert
    pub fn new(creator_id: Uuid, media_url: String, caption: Option<String>) -> Result<Self> {
        validate_https_url(&media_url, "Media URL")?;
        if let Some(ref c) = caption {
            if c.len() > MAX_CAPTION_LENGTH {
                return Err(Error::Validation(format!(
                    "Caption must be at most {} characters",
                    MAX_CAPTION_LENGTH
                )));
            }
        }

        Ok(GalleryItem {
            id: Uuid::new_v4(),
            creator_id,
            media_url,
            caption,
            position: 0,
            created_at: Utc::now(),
        })
    }
}

/// A creator post shown on the public profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub caption: String,
    pub media_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Maximum post caption length (CHECK length <= 2000)
const MAX_POST_CAPTION_LENGTH: usize = 2000;

impl Post {
    /// Create a new post
    pub fn new(
        creator_id: Uuid,
        caption: String,
        media_url: Option<String>,
        publish: bool,
    ) -> Result<Self> {
        if caption.trim().is_empty() {
            return Err(Error::Validation("Caption cannot be blank".to_string()));
        }
        if caption.len() > MAX_POST_CAPTION_LENGTH {
            return Err(Error::Validation(format!(
                "Caption must be at most {} characters",
                MAX_POST_CAPTION_LENGTH
            )));
        }
        if let Some(ref url) = media_url {
            validate_https_url(url, "Media URL")?;
        }

        let now = Utc::now();
        Ok(Post {
            id: Uuid::new_v4(),
            creator_id,
            caption,
            media_url,
            published_at: publish.then_some(now),
            created_at: now,
        })
    }

    /// Check if the post is publicly visible
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Enum tests

    #[test]
    fn test_creator_status_display() {
        assert_eq!(CreatorStatus::Online.to_string(), "online");
        assert_eq!(CreatorStatus::Busy.to_string(), "busy");
        assert_eq!(CreatorStatus::Offline.to_string(), "offline");
    }

    #[test]
    fn test_creator_status_default_is_offline() {
        assert_eq!(CreatorStatus::default(), CreatorStatus::Offline);
    }

    #[test]
    fn test_creator_status_serialization_lowercase() {
        assert_eq!(
            serde_json::to_string(&CreatorStatus::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(
            serde_json::to_string(&CreatorStatus::Busy).unwrap(),
            "\"busy\""
        );
    }

    // Creator entity

    fn valid_creator() -> Creator {
        Creator::new(
            Uuid::new_v4(),
            "ana_souza".to_string(),
            "Ana Souza".to_string(),
            Decimal::new(1500, 2),
        )
        .unwrap()
    }

    #[test]
    fn test_creator_creation() {
        let creator = valid_creator();
        assert_eq!(creator.handle, "ana_souza");
        assert_eq!(creator.status, CreatorStatus::Offline);
        assert_eq!(creator.price_per_message, Decimal::new(1500, 2));
        assert!(creator.bio.is_none());
        assert!(!creator.is_suspended());
    }

    #[test]
    fn test_creator_handle_too_short_rejected() {
        let result = Creator::new(
            Uuid::new_v4(),
            "ab".to_string(),
            "Ana".to_string(),
            Decimal::new(1500, 2),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_creator_handle_30_chars_valid() {
        let handle = "a".repeat(30);
        assert!(Creator::validate_handle(&handle).is_ok());
    }

    #[test]
    fn test_creator_handle_31_chars_rejected() {
        let handle = "a".repeat(31);
        assert!(Creator::validate_handle(&handle).is_err());
    }

    #[test]
    fn test_creator_handle_uppercase_rejected() {
        assert!(Creator::validate_handle("AnaSouza").is_err());
    }

    #[test]
    fn test_creator_handle_special_chars_rejected() {
        assert!(Creator::validate_handle("ana-souza").is_err());
        assert!(Creator::validate_handle("ana souza").is_err());
        assert!(Creator::validate_handle("ana.souza").is_err());
    }

    #[test]
    fn test_creator_handle_digits_and_underscores_valid() {
        assert!(Creator::validate_handle("ana_souza_99").is_ok());
    }

    #[test]
    fn test_creator_price_below_minimum_rejected() {
        let result = Creator::new(
            Uuid::new_v4(),
            "ana_souza".to_string(),
            "Ana".to_string(),
            Decimal::new(99, 2),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_creator_price_bounds() {
        assert!(Creator::validate_price(Decimal::new(100, 2)).is_ok()); // R$ 1,00
        assert!(Creator::validate_price(Decimal::new(500_000, 2)).is_ok()); // R$ 5000,00
        assert!(Creator::validate_price(Decimal::new(500_001, 2)).is_err());
        assert!(Creator::validate_price(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_creator_bio_2000_chars_valid() {
        assert!(Creator::validate_bio(&"a".repeat(2000)).is_ok());
        assert!(Creator::validate_bio(&"a".repeat(2001)).is_err());
    }

    #[test]
    fn test_creator_display_name_blank_rejected() {
        assert!(Creator::validate_display_name("  ").is_err());
    }

    // CreatorService entity

    #[test]
    fn test_service_creation() {
        let creator_id = Uuid::new_v4();
        let service = CreatorService::new(
            creator_id,
            "Custom video".to_string(),
            Some("A personalized video".to_string()),
            Decimal::new(15000, 2),
            7,
        )
        .unwrap();

        assert_eq!(service.creator_id, creator_id);
        assert_eq!(service.title, "Custom video");
        assert!(service.is_active);
        assert_eq!(service.delivery_days, 7);
    }

    #[test]
    fn test_service_blank_title_rejected() {
        let result = CreatorService::new(
            Uuid::new_v4(),
            "   ".to_string(),
            None,
            Decimal::new(15000, 2),
            7,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_service_title_length_limit() {
        assert!(CreatorService::validate_title(&"a".repeat(120)).is_ok());
        assert!(CreatorService::validate_title(&"a".repeat(121)).is_err());
    }

    #[test]
    fn test_service_delivery_days_bounds() {
        assert!(CreatorService::validate_delivery_days(1).is_ok());
        assert!(CreatorService::validate_delivery_days(60).is_ok());
        assert!(CreatorService::validate_delivery_days(0).is_err());
        assert!(CreatorService::validate_delivery_days(61).is_err());
    }

    #[test]
    fn test_service_price_validated() {
        let result = CreatorService::new(
            Uuid::new_v4(),
            "Video".to_string(),
            None,
            Decimal::new(50, 2),
            7,
        );
        assert!(result.is_err());
    }

    // GalleryItem entity

    #[test]
    fn test_gallery_item_creation() {
        let creator_id = Uuid::new_v4();
        let item = GalleryItem::new(
            creator_id,
            "https://cdn.mimo.app/g/1.jpg".to_string(),
            Some("Backstage".to_string()),
        )
        .unwrap();

        assert_eq!(item.creator_id, creator_id);
        assert_eq!(item.position, 0);
    }

    #[test]
    fn test_gallery_item_http_url_rejected() {
        let result = GalleryItem::new(
            Uuid::new_v4(),
            "http://cdn.mimo.app/g/1.jpg".to_string(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_gallery_item_caption_length_limit() {
        let result = GalleryItem::new(
            Uuid::new_v4(),
            "https://cdn.mimo.app/g/1.jpg".to_string(),
            Some("a".repeat(201)),
        );
        assert!(result.is_err());
    }

    // Post entity

    #[test]
    fn test_post_creation_published() {
        let post = Post::new(Uuid::new_v4(), "Hello!".to_string(), None, true).unwrap();
        assert!(post.is_published());
    }

    #[test]
    fn test_post_creation_draft() {
        let post = Post::new(Uuid::new_v4(), "Hello!".to_string(), None, false).unwrap();
        assert!(!post.is_published());
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_post_blank_caption_rejected() {
        let result = Post::new(Uuid::new_v4(), " \n ".to_string(), None, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_post_caption_length_limit() {
        assert!(Post::new(Uuid::new_v4(), "a".repeat(2000), None, true).is_ok());
        assert!(Post::new(Uuid::new_v4(), "a".repeat(2001), None, true).is_err());
    }

    // Serialization

    #[test]
    fn test_creator_serialization_roundtrip() {
        let creator = valid_creator();
        let json = serde_json::to_string(&creator).unwrap();
        let deserialized: Creator = serde_json::from_str(&json).unwrap();

        assert_eq!(creator.id, deserialized.id);
        assert_eq!(creator.handle, deserialized.handle);
        assert_eq!(creator.status, deserialized.status);
        assert_eq!(creator.price_per_message, deserialized.price_per_message);
    }
}
