//! Site-wide SEO settings with a small in-process cache.
//!
//! The settings row is read on every page render, so reads are served
//! from a TTL cache. Writes clear the cache so the next read observes
//! the new value. A fetch failure degrades to a built-in default
//! instead of failing the page.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use rental_platform_shared::SaveSeoSettingsRequest;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::SeoSettings;

/// TTL cache holding the settings singleton. Shared behind an `Arc`
/// inside `SeoService`; the lock is held only to copy in or out.
pub struct SeoCache {
    ttl: Duration,
    entry: RwLock<Option<(SeoSettings, Instant)>>,
}

impl SeoCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn get(&self) -> Option<SeoSettings> {
        let guard = self.entry.read().ok()?;
        match guard.as_ref() {
            Some((settings, stored_at)) if stored_at.elapsed() < self.ttl => {
                Some(settings.clone())
            }
            _ => None,
        }
    }

    pub fn set(&self, settings: SeoSettings) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = Some((settings, Instant::now()));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = None;
        }
    }
}

pub struct SeoService {
    cache: SeoCache,
    site_name: String,
}

impl SeoService {
    pub fn new(ttl: Duration, site_name: String) -> Self {
        Self {
            cache: SeoCache::new(ttl),
            site_name,
        }
    }

    /// Read the settings, serving from cache while fresh. A database
    /// failure is logged and papered over with the built-in default so
    /// public pages keep rendering.
    pub async fn get_settings(&self, pool: &PgPool) -> SeoSettings {
        if let Some(cached) = self.cache.get() {
            return cached;
        }

        match SeoSettings::first_or_create(pool, &self.site_name).await {
            Ok(settings) => {
                self.cache.set(settings.clone());
                settings
            }
            Err(error) => {
                tracing::warn!(%error, "seo settings fetch failed, serving defaults");
                SeoSettings::default_for_site(&self.site_name)
            }
        }
    }

    /// Persist new settings and invalidate the cache.
    pub async fn save_settings(
        &self,
        pool: &PgPool,
        request: &SaveSeoSettingsRequest,
    ) -> Result<SeoSettings, AppError> {
        let settings = SeoSettings::save(
            pool,
            &request.site_name,
            request.site_description.as_deref(),
            request.keywords.as_deref().unwrap_or(&[]),
            request.google_analytics_id.as_deref(),
            request.default_og_image.as_deref(),
        )
        .await?;

        self.cache.clear();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(site_name: &str) -> SeoSettings {
        SeoSettings::default_for_site(site_name)
    }

    #[test]
    fn serves_cached_value_within_ttl() {
        let cache = SeoCache::new(Duration::from_secs(60));
        cache.set(settings("Rentals"));

        assert_eq!(cache.get().unwrap().site_name, "Rentals");
    }

    #[test]
    fn expires_after_ttl() {
        let cache = SeoCache::new(Duration::from_millis(10));
        cache.set(settings("Rentals"));

        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get().is_none());
    }

    #[test]
    fn clear_discards_fresh_entry() {
        let cache = SeoCache::new(Duration::from_secs(60));
        cache.set(settings("Rentals"));
        cache.clear();

        assert!(cache.get().is_none());
    }

    #[test]
    fn set_replaces_previous_entry() {
        let cache = SeoCache::new(Duration::from_secs(60));
        cache.set(settings("Old"));
        cache.set(settings("New"));

        assert_eq!(cache.get().unwrap().site_name, "New");
    }

    #[test]
    fn empty_cache_misses() {
        let cache = SeoCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());
    }
}
