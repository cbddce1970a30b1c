//! Slug assignment policies for content entities.
//!
//! Each entity resolves collisions differently: blog posts append a
//! numeric suffix until the slug is free, pages reject with a conflict,
//! and service pages treat the (service, location) pair as the key.
//! The unique indexes remain the final arbiter under concurrency; the
//! pre-checks here just give a friendlier error on the common path.

use std::collections::HashSet;

use rental_platform_shared::{ERROR_SERVICE_PAGE_EXISTS, ERROR_SLUG_TAKEN};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{BlogPost, Page, ServicePage};
use crate::utils::slug::{slugify, with_suffix};

/// Derive a blog post slug from the title, appending `-2`, `-3`, ...
/// until an unused slug is found.
pub async fn unique_blog_slug(pool: &PgPool, title: &str) -> Result<String, AppError> {
    unique_blog_slug_excluding(pool, title, None).await
}

/// Same policy when re-slugging an existing post. Its own row must not
/// count as a collision, or saving an unchanged title would walk the
/// suffix forward on every edit.
pub async fn unique_blog_slug_excluding(
    pool: &PgPool,
    title: &str,
    exclude: Option<Uuid>,
) -> Result<String, AppError> {
    let base = slugify(title);
    let taken: HashSet<String> = BlogPost::slugs_in_family(pool, &base, exclude)
        .await?
        .into_iter()
        .collect();

    Ok(first_free_slug(&base, &taken))
}

fn first_free_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let candidate = with_suffix(base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Resolve a page slug: explicit slug wins over the title-derived one,
/// and an existing slug is a conflict rather than a suffix candidate.
pub async fn page_slug(
    pool: &PgPool,
    title: &str,
    explicit: Option<&str>,
) -> Result<String, AppError> {
    let slug = match explicit {
        Some(explicit) => slugify(explicit),
        None => slugify(title),
    };

    reject_taken(Page::slug_exists(pool, &slug).await?, ERROR_SLUG_TAKEN)?;

    Ok(slug)
}

/// Service pages are keyed by the (service, location) slug pair.
pub async fn ensure_service_pair_free(
    pool: &PgPool,
    service_slug: &str,
    location_slug: &str,
) -> Result<(), AppError> {
    reject_taken(
        ServicePage::pair_exists(pool, service_slug, location_slug).await?,
        ERROR_SERVICE_PAGE_EXISTS,
    )
}

fn reject_taken(taken: bool, message: &str) -> Result<(), AppError> {
    if taken {
        return Err(AppError::Conflict(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn free_base_is_kept() {
        assert_eq!(first_free_slug("desert-safari", &taken(&[])), "desert-safari");
    }

    #[test]
    fn taken_base_gets_first_suffix() {
        assert_eq!(
            first_free_slug("desert-safari", &taken(&["desert-safari"])),
            "desert-safari-2"
        );
    }

    #[test]
    fn suffixes_advance_past_taken_candidates() {
        assert_eq!(
            first_free_slug(
                "desert-safari",
                &taken(&["desert-safari", "desert-safari-2", "desert-safari-3"])
            ),
            "desert-safari-4"
        );
    }

    #[test]
    fn gaps_in_the_suffix_sequence_are_reused() {
        assert_eq!(
            first_free_slug("desert-safari", &taken(&["desert-safari", "desert-safari-3"])),
            "desert-safari-2"
        );
    }

    #[test]
    fn existing_pair_is_rejected_before_anything_is_written() {
        let err = reject_taken(true, ERROR_SERVICE_PAGE_EXISTS).unwrap_err();
        assert!(matches!(err, AppError::Conflict(m) if m == ERROR_SERVICE_PAGE_EXISTS));
    }

    #[test]
    fn free_pair_passes() {
        assert!(reject_taken(false, ERROR_SERVICE_PAGE_EXISTS).is_ok());
    }

    #[test]
    fn taken_page_slug_is_a_conflict() {
        let err = reject_taken(true, ERROR_SLUG_TAKEN).unwrap_err();
        assert!(matches!(err, AppError::Conflict(m) if m == ERROR_SLUG_TAKEN));
    }
}
