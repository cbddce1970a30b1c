use std::time::Duration;

// JWT configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(12 * 60 * 60); // 12 hours

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// SEO settings cache
pub const DEFAULT_SEO_CACHE_TTL_SECONDS: u64 = 300; // 5 minutes

// Sitemap defaults
pub const SITEMAP_CHANGEFREQ_STATIC: &str = "weekly";
pub const SITEMAP_CHANGEFREQ_CONTENT: &str = "daily";
pub const SITEMAP_PRIORITY_HOME: &str = "1.0";
pub const SITEMAP_PRIORITY_CONTENT: &str = "0.8";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const ERROR_CAR_NOT_FOUND: &str = "Car not found";
pub const ERROR_BOOKING_NOT_FOUND: &str = "Booking not found";
pub const ERROR_INVALID_DATE_RANGE: &str = "Return date must be after pickup date";
pub const ERROR_SLUG_TAKEN: &str = "A page with this slug already exists";
pub const ERROR_SERVICE_PAGE_EXISTS: &str =
    "A service page for this service and location already exists";

// Validation patterns
pub const PHONE_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";
