use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Keeps "field absent" distinct from "field: null" on partial updates,
/// so an explicit null can clear a nullable column. An absent field
/// deserializes to `None`, a null to `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Auth DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub role: UserRole,
    pub expires_in: i64,
}

// Car DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1990, max = 2100))]
    pub year: i32,

    pub car_type: CarType,

    #[validate(range(min = 1, max = 20))]
    pub seats: i32,

    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub price_per_day: Decimal,
    pub price_per_week: Option<Decimal>,
    pub price_per_month: Option<Decimal>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub is_available: Option<bool>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1990, max = 2100))]
    pub year: Option<i32>,

    pub car_type: Option<CarType>,

    #[validate(range(min = 1, max = 20))]
    pub seats: Option<i32>,

    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub price_per_day: Option<Decimal>,

    #[serde(default, deserialize_with = "double_option")]
    pub price_per_week: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub price_per_month: Option<Option<Decimal>>,

    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub car_type: CarType,
    pub seats: i32,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub price_per_day: Decimal,
    pub price_per_week: Option<Decimal>,
    pub price_per_month: Option<Decimal>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Booking DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub car_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,

    #[validate(email)]
    pub customer_email: String,

    #[validate(length(min = 5, max = 20))]
    pub customer_phone: String,

    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,

    #[validate(length(min = 1, max = 255))]
    pub pickup_location: String,

    #[validate(length(max = 20))]
    pub pickup_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub pickup_location: String,
    pub pickup_time: Option<String>,
    pub total_days: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub booking: BookingResponse,
    pub whatsapp_link: String,
}

// Blog DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(length(max = 500))]
    pub excerpt: Option<String>,

    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[validate(length(max = 500))]
    #[serde(default, deserialize_with = "double_option")]
    pub excerpt: Option<Option<String>>,

    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_keywords: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Page DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub slug: Option<String>,

    #[validate(length(min = 1))]
    pub content: String,

    pub page_type: Option<PageType>,
    pub is_published: Option<bool>,

    // Tour-variant fields
    pub tour_price: Option<Decimal>,
    pub tour_duration: Option<String>,
    pub tour_highlights: Option<Vec<String>>,
    pub tour_inclusions: Option<Vec<String>>,
    pub tour_rating: Option<f64>,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdatePageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    pub page_type: Option<PageType>,
    pub is_published: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub tour_price: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub tour_duration: Option<Option<String>>,

    pub tour_highlights: Option<Vec<String>>,
    pub tour_inclusions: Option<Vec<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub tour_rating: Option<Option<f64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub page_type: PageType,
    pub is_published: bool,
    pub tour_price: Option<Decimal>,
    pub tour_duration: Option<String>,
    pub tour_highlights: Vec<String>,
    pub tour_inclusions: Vec<String>,
    pub tour_rating: Option<f64>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Service page DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateServicePageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub service_slug: String,

    #[validate(length(min = 1, max = 100))]
    pub location_slug: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub is_published: Option<bool>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateServicePageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    pub is_published: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServicePageResponse {
    pub id: Uuid,
    pub title: String,
    pub service_slug: String,
    pub location_slug: String,
    pub content: String,
    pub is_published: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Menu DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateMenuRequest {
    #[validate(length(min = 1, max = 100))]
    pub label: String,

    #[validate(length(min = 1, max = 500))]
    pub href: String,

    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub location: MenuLocation,
    pub open_in_new_tab: Option<bool>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateMenuRequest {
    #[validate(length(min = 1, max = 100))]
    pub label: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub href: Option<String>,

    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub location: Option<MenuLocation>,
    pub open_in_new_tab: Option<bool>,

    // `"parent_id": null` detaches the entry back to the root level.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

/// A navigation entry with its resolved children, as rendered by the
/// header/footer. Children follow the query sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTreeNode {
    pub id: Uuid,
    pub label: String,
    pub href: String,
    pub position: i32,
    pub location: MenuLocation,
    pub open_in_new_tab: bool,
    pub children: Vec<MenuTreeNode>,
}

// Notification DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub message: String,

    pub notification_type: NotificationType,
    pub display_locations: Vec<DisplayLocation>,
    pub is_active: Option<bool>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub priority: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub message: Option<String>,

    pub notification_type: Option<NotificationType>,
    pub display_locations: Option<Vec<DisplayLocation>>,
    pub is_active: Option<bool>,
    pub starts_at: Option<DateTime<Utc>>,

    // `"ends_at": null` makes the display window open-ended again.
    #[serde(default, deserialize_with = "double_option")]
    pub ends_at: Option<Option<DateTime<Utc>>>,

    pub priority: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub display_locations: Vec<DisplayLocation>,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Subscriber DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSubscriberRequest {
    pub status: SubscriberStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriberResponse {
    pub id: Uuid,
    pub email: String,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// SEO settings DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveSeoSettingsRequest {
    #[validate(length(min = 1, max = 255))]
    pub site_name: String,

    #[validate(length(max = 500))]
    pub site_description: Option<String>,

    pub keywords: Option<Vec<String>>,
    pub google_analytics_id: Option<String>,
    pub default_og_image: Option<String>,
}

// Generic pagination wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_update_distinguishes_null_from_absent_parent() {
        let cleared: UpdateMenuRequest = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert_eq!(cleared.parent_id, Some(None));

        let untouched: UpdateMenuRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.parent_id, None);
    }

    #[test]
    fn menu_update_carries_a_new_parent() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"parent_id": "{id}"}}"#);
        let moved: UpdateMenuRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(moved.parent_id, Some(Some(id)));
    }

    #[test]
    fn notification_update_can_reopen_the_window() {
        let cleared: UpdateNotificationRequest =
            serde_json::from_str(r#"{"ends_at": null}"#).unwrap();
        assert_eq!(cleared.ends_at, Some(None));

        let untouched: UpdateNotificationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.ends_at, None);
    }

    #[test]
    fn blog_update_can_drop_the_excerpt() {
        let cleared: UpdateBlogPostRequest = serde_json::from_str(r#"{"excerpt": null}"#).unwrap();
        assert_eq!(cleared.excerpt, Some(None));

        let replaced: UpdateBlogPostRequest =
            serde_json::from_str(r#"{"excerpt": "short"}"#).unwrap();
        assert_eq!(replaced.excerpt, Some(Some("short".to_string())));
    }

    #[test]
    fn car_update_can_remove_weekly_rate() {
        let cleared: UpdateCarRequest =
            serde_json::from_str(r#"{"price_per_week": null}"#).unwrap();
        assert_eq!(cleared.price_per_week, Some(None));

        let untouched: UpdateCarRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.price_per_week, None);
    }
}
