use rental_platform_shared::DEFAULT_SEO_CACHE_TTL_SECONDS;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub site_base_url: String,
    pub site_name: String,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub whatsapp_number: String,
    pub seo_cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("site_name", "Car Rental")?
            .set_default("seo_cache_ttl_secs", DEFAULT_SEO_CACHE_TTL_SECONDS as i64)?
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }

    pub fn seo_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.seo_cache_ttl_secs)
    }
}
