//! XML sitemap generation.
//!
//! Collects every publicly reachable URL (static routes, available
//! cars, published posts, pages and service pages) and renders the
//! standard sitemap protocol document. Rendering is a pure function
//! over collected entries so it can be tested without a database.

use chrono::{DateTime, Utc};
use rental_platform_shared::{
    PageType, SITEMAP_CHANGEFREQ_CONTENT, SITEMAP_CHANGEFREQ_STATIC, SITEMAP_PRIORITY_CONTENT,
    SITEMAP_PRIORITY_HOME,
};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{BlogPost, Car, Page, ServicePage};

const STATIC_ROUTES: &[&str] = &["", "/cars", "/blog", "/contact"];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Build the full sitemap for the site. Unpublished and unavailable
/// content never appears.
pub async fn generate(pool: &PgPool, base_url: &str) -> Result<String, AppError> {
    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|route| SitemapEntry {
            loc: format!("{base_url}{route}"),
            lastmod: None,
            changefreq: SITEMAP_CHANGEFREQ_STATIC,
            priority: SITEMAP_PRIORITY_HOME,
        })
        .collect();

    for car in Car::find_all(pool, true, i64::MAX, 0).await? {
        entries.push(SitemapEntry {
            loc: format!("{base_url}/cars/{}", car.slug),
            lastmod: Some(car.updated_at),
            changefreq: SITEMAP_CHANGEFREQ_CONTENT,
            priority: SITEMAP_PRIORITY_CONTENT,
        });
    }

    for post in BlogPost::find_all(pool, true, i64::MAX, 0).await? {
        entries.push(SitemapEntry {
            loc: format!("{base_url}/blog/{}", post.slug),
            lastmod: Some(post.updated_at),
            changefreq: SITEMAP_CHANGEFREQ_CONTENT,
            priority: SITEMAP_PRIORITY_CONTENT,
        });
    }

    for page in Page::find_all(pool, true, None).await? {
        let prefix = match page.page_type {
            PageType::Tour => "/tours",
            PageType::Standard => "",
        };
        entries.push(SitemapEntry {
            loc: format!("{base_url}{prefix}/{}", page.slug),
            lastmod: Some(page.updated_at),
            changefreq: SITEMAP_CHANGEFREQ_CONTENT,
            priority: SITEMAP_PRIORITY_CONTENT,
        });
    }

    for service_page in ServicePage::find_all(pool, true).await? {
        entries.push(SitemapEntry {
            loc: format!(
                "{base_url}/services/{}/{}",
                service_page.service_slug, service_page.location_slug
            ),
            lastmod: Some(service_page.updated_at),
            changefreq: SITEMAP_CHANGEFREQ_CONTENT,
            priority: SITEMAP_PRIORITY_CONTENT,
        });
    }

    Ok(render(&entries))
}

/// Render entries as a sitemap protocol document.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(entries.len() * 160 + 128);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_entry_with_lastmod() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/cars/bmw-x5".to_string(),
            lastmod: Some(Utc.with_ymd_and_hms(2024, 5, 12, 9, 30, 0).unwrap()),
            changefreq: SITEMAP_CHANGEFREQ_CONTENT,
            priority: SITEMAP_PRIORITY_CONTENT,
        }];

        let xml = render(&entries);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/cars/bmw-x5</loc>"));
        assert!(xml.contains("<lastmod>2024-05-12</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn omits_lastmod_for_static_routes() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/".to_string(),
            lastmod: None,
            changefreq: SITEMAP_CHANGEFREQ_STATIC,
            priority: SITEMAP_PRIORITY_HOME,
        }];

        let xml = render(&entries);

        assert!(!xml.contains("<lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn escapes_xml_metacharacters_in_urls() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/search?a=1&b=2".to_string(),
            lastmod: None,
            changefreq: SITEMAP_CHANGEFREQ_STATIC,
            priority: SITEMAP_PRIORITY_HOME,
        }];

        let xml = render(&entries);

        assert!(xml.contains("a=1&amp;b=2"));
        assert!(!xml.contains("a=1&b=2</loc>"));
    }

    #[test]
    fn empty_sitemap_is_still_valid() {
        let xml = render(&[]);
        assert!(xml.contains("<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
