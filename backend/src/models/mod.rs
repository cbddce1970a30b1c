//! Database models for the car rental platform.
//!
//! Each model corresponds to a database table and provides its CRUD
//! operations using sqlx.

pub mod blog_post;
pub mod booking;
pub mod car;
pub mod menu;
pub mod notification;
pub mod page;
pub mod seo_settings;
pub mod service_page;
pub mod subscriber;

pub use blog_post::BlogPost;
pub use booking::Booking;
pub use car::Car;
pub use menu::Menu;
pub use notification::Notification;
pub use page::Page;
pub use seo_settings::SeoSettings;
pub use service_page::ServicePage;
pub use subscriber::Subscriber;

/// Pagination helper shared by the list endpoints.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(rental_platform_shared::DEFAULT_PAGE_SIZE)
                .clamp(1, rental_platform_shared::MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn pagination_clamps_to_sane_bounds() {
        let p = Pagination::new(Some(1000), Some(-5));
        assert_eq!(p.limit, rental_platform_shared::MAX_PAGE_SIZE);
        assert_eq!(p.offset, 0);

        let p = Pagination::new(None, None);
        assert_eq!(p.limit, rental_platform_shared::DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset, 0);
    }
}
