// Demo mode: serve fixture content instead of calling the content API
//
// Lets the TUI be showcased (and exercised end to end) without a backend.
// All data is deterministic: three categories with fixed post counts, so
// pagination, page counts, and the last-page jump behave exactly like a
// small real site.
//
// Run with: GAZETTE_DEMO=1 cargo run --release

use crate::api::models::{Category, PageCursor, Post, SiteInfo, Viewer};
use crate::catalog::Catalog;
use chrono::NaiveDate;

/// Simulated network latency so loading states are visible
pub const DEMO_LATENCY_MS: u64 = 250;

/// Post counts per demo category
const DEMO_CATEGORIES: &[(&str, &str, usize, Option<u32>)] = &[
    ("Actualités", "news", 30, None),
    ("Événements", "events", 18, None),
    ("Forum", "forum", 5, Some(6)),
];

/// The demo site's catalog
pub fn catalog() -> Catalog {
    let site = site_info();
    let categories = DEMO_CATEGORIES
        .iter()
        .map(|&(name, slug, _, posts_per_page)| Category {
            name: name.to_string(),
            slug: slug.to_string(),
            background_image_url: Some(format!("https://demo.invalid/media/{}.jpg", slug)),
            caption: Some(site.description.clone()),
            posts_per_page,
        })
        .collect();
    Catalog { site, categories }
}

pub fn site_info() -> SiteInfo {
    SiteInfo {
        title: "Gazette du quartier".to_string(),
        description: "Le journal de la résidence et de ses environs".to_string(),
        icon_link: None,
    }
}

pub fn viewer() -> Viewer {
    Viewer {
        id: "demo-user".to_string(),
        name: "Visiteur".to_string(),
        email: Some("visiteur@demo.invalid".to_string()),
    }
}

/// One page of demo posts. The token is either one minted by a previous
/// demo page (`demo-cursor-N`) or a post slug (the last-page jump uses the
/// slug of the last loaded post), resolved to the position after that post.
pub fn page(category_slug: &str, after: Option<&str>, first: u32) -> (Vec<Post>, PageCursor) {
    let all = category_posts(category_slug);
    let offset = match after {
        None => 0,
        Some(token) => resolve_token(&all, token),
    };

    let end = (offset + first as usize).min(all.len());
    let posts: Vec<Post> = all[offset.min(all.len())..end].to_vec();
    let has_next_page = end < all.len();
    let cursor = PageCursor {
        end_cursor: if posts.is_empty() {
            None
        } else {
            Some(format!("demo-cursor-{}", end))
        },
        has_next_page,
    };
    (posts, cursor)
}

/// Post and page counts, matching the count query's contract
pub fn page_count(category_slug: &str, posts_per_page: u32) -> (u32, u32) {
    let total = category_posts(category_slug).len() as u32;
    let pages = if posts_per_page == 0 {
        0
    } else {
        total.div_ceil(posts_per_page)
    };
    (total, pages)
}

/// Single post lookup across every demo category
pub fn post_by_slug(slug: &str) -> Option<Post> {
    DEMO_CATEGORIES
        .iter()
        .flat_map(|&(_, category, _, _)| category_posts(category))
        .find(|post| post.slug == slug)
}

fn resolve_token(all: &[Post], token: &str) -> usize {
    if let Some(rest) = token.strip_prefix("demo-cursor-") {
        return rest.parse().unwrap_or(0);
    }
    // Slug token: resume after that post
    all.iter()
        .position(|post| post.slug == token)
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

fn category_posts(category_slug: &str) -> Vec<Post> {
    let count = DEMO_CATEGORIES
        .iter()
        .find(|&&(_, slug, _, _)| slug == category_slug)
        .map(|&(_, _, count, _)| count)
        .unwrap_or(0);

    let base = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid base date");
    (0..count)
        .map(|i| {
            let date = base - chrono::Duration::days(i as i64);
            Post {
                slug: format!("{}-{}", category_slug, i + 1),
                title: format!("Article {} n° {}", category_slug, i + 1),
                html_content: format!(
                    "<p>Compte-rendu n° {} de la catégorie {}. La réunion s'est tenue \
                     dans la salle commune et l'ordre du jour portait sur l'entretien \
                     des parties communes, le budget de l'année et les travaux à venir. \
                     Les résidents présents ont voté les trois motions proposées.</p>\
                     <p>Le détail des échanges est disponible auprès du secrétariat.</p>",
                    i + 1,
                    category_slug
                ),
                publish_date: date.and_hms_opt(9, 0, 0),
                modified_date: date.and_hms_opt(17, 30, 0),
                author_name: Some("Secrétariat".to_string()),
                status: Some("publish".to_string()),
                permalink: Some(format!(
                    "https://demo.invalid/post/{}-{}",
                    category_slug,
                    i + 1
                )),
                featured_image: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_is_cursorless_and_full() {
        let (posts, cursor) = page("news", None, 12);
        assert_eq!(posts.len(), 12);
        assert!(cursor.has_next_page);
        assert_eq!(cursor.end_cursor.as_deref(), Some("demo-cursor-12"));
    }

    #[test]
    fn test_cursor_token_continues_where_previous_page_ended() {
        let (first_page, cursor) = page("news", None, 12);
        let (second_page, _) = page("news", cursor.end_cursor.as_deref(), 12);
        assert_eq!(first_page.last().unwrap().slug, "news-12");
        assert_eq!(second_page.first().unwrap().slug, "news-13");
    }

    #[test]
    fn test_tail_page_has_no_next() {
        let (posts, cursor) = page("news", Some("demo-cursor-24"), 12);
        assert_eq!(posts.len(), 6);
        assert!(!cursor.has_next_page);
    }

    #[test]
    fn test_slug_token_resumes_after_that_post() {
        let (posts, _) = page("events", Some("events-12"), 12);
        assert_eq!(posts.first().unwrap().slug, "events-13");
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count("news", 12), (30, 3));
        assert_eq!(page_count("forum", 6), (5, 1));
    }

    #[test]
    fn test_post_by_slug_searches_all_categories() {
        assert!(post_by_slug("forum-5").is_some());
        assert!(post_by_slug("forum-6").is_none());
    }
}
