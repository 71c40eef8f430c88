//! Category catalog
//!
//! Loaded once at startup and immutable for the rest of the session. The
//! category set comes back in API order (no client-side resort). Each
//! category is then matched against the media library by slug: a matching
//! media item contributes the background image and caption; categories with
//! no match fall back to the site-wide description.

use crate::api::models::{Category, CategoryNode, MediaNode, SiteInfo};
use crate::api::ApiClient;
use crate::error::ApiError;

/// The loaded catalog: site settings plus the ordered category set
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub site: SiteInfo,
    pub categories: Vec<Category>,
}

/// Fetch site info, categories, and background media, and assemble the
/// catalog. Any failure aborts the whole load: the catalog stays empty, no
/// partial or cached fallback.
pub async fn load(api: &ApiClient) -> Result<Catalog, ApiError> {
    let site = api.site_info().await?;
    let nodes = api.categories().await?;

    let slugs: Vec<String> = nodes.iter().map(|c| c.slug.clone()).collect();
    let media = if slugs.is_empty() {
        Vec::new()
    } else {
        api.media_items(&slugs).await?
    };

    let categories = resolve_media(nodes, &media, &site.description);
    tracing::info!(
        categories = categories.len(),
        backgrounds = categories
            .iter()
            .filter(|c| c.background_image_url.is_some())
            .count(),
        "catalog loaded"
    );

    Ok(Catalog { site, categories })
}

/// Join categories with their background media by slug, filling captions
/// from the site description where no media item matches. Categories whose
/// menu-visibility flag is explicitly false are dropped from the catalog.
fn resolve_media(
    nodes: Vec<CategoryNode>,
    media: &[MediaNode],
    site_description: &str,
) -> Vec<Category> {
    nodes
        .into_iter()
        .filter(|node| node.show_in_menu.unwrap_or(true))
        .map(|node| {
            let matched = media.iter().find(|item| item.slug == node.slug);
            Category {
                background_image_url: matched.and_then(|item| item.link.clone()),
                caption: matched
                    .and_then(|item| item.caption.clone())
                    .or_else(|| Some(site_description.to_string())),
                name: node.name,
                slug: node.slug,
                posts_per_page: node.posts_per_page,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, slug: &str) -> CategoryNode {
        CategoryNode {
            name: name.to_string(),
            slug: slug.to_string(),
            posts_per_page: None,
            show_in_menu: None,
        }
    }

    fn media(slug: &str, link: &str, caption: Option<&str>) -> MediaNode {
        MediaNode {
            link: Some(link.to_string()),
            caption: caption.map(str::to_string),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_category_without_media_falls_back_to_site_description() {
        let categories = resolve_media(
            vec![node("Actualités", "news")],
            &[],
            "Le site du quartier",
        );
        assert_eq!(categories[0].caption.as_deref(), Some("Le site du quartier"));
        assert_eq!(categories[0].background_image_url, None);
    }

    #[test]
    fn test_matching_media_contributes_image_and_caption() {
        let categories = resolve_media(
            vec![node("Actualités", "news"), node("Événements", "events")],
            &[media("events", "https://example.org/events.jpg", Some("<p>Agenda</p>"))],
            "Le site du quartier",
        );
        // No match: fallback
        assert_eq!(categories[0].caption.as_deref(), Some("Le site du quartier"));
        // Match: media wins
        assert_eq!(
            categories[1].background_image_url.as_deref(),
            Some("https://example.org/events.jpg")
        );
        assert_eq!(categories[1].caption.as_deref(), Some("<p>Agenda</p>"));
    }

    #[test]
    fn test_media_without_caption_still_falls_back() {
        let categories = resolve_media(
            vec![node("Forum", "forum")],
            &[media("forum", "https://example.org/forum.jpg", None)],
            "Le site du quartier",
        );
        assert_eq!(
            categories[0].background_image_url.as_deref(),
            Some("https://example.org/forum.jpg")
        );
        assert_eq!(categories[0].caption.as_deref(), Some("Le site du quartier"));
    }

    #[test]
    fn test_api_order_is_preserved() {
        let categories = resolve_media(
            vec![node("Zèbre", "zebre"), node("Abeille", "abeille")],
            &[],
            "",
        );
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zèbre", "Abeille"]);
    }

    #[test]
    fn test_hidden_categories_are_dropped() {
        let mut hidden = node("Interne", "interne");
        hidden.show_in_menu = Some(false);
        let categories = resolve_media(vec![node("Actualités", "news"), hidden], &[], "");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "news");
    }
}
