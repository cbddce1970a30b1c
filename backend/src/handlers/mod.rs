pub mod auth;
pub mod blog;
pub mod bookings;
pub mod cars;
pub mod health;
pub mod menus;
pub mod notifications;
pub mod pages;
pub mod seo;
pub mod service_pages;
pub mod sitemap;
pub mod subscribers;
