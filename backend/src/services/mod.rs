pub mod booking_service;
pub mod content_service;
pub mod menu_service;
pub mod seo_service;
pub mod sitemap_service;

pub use seo_service::SeoService;
