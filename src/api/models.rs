//! Typed schemas for the content API
//!
//! Every response is deserialized into one of these structs at the client
//! boundary; dynamic JSON never reaches domain state. Wire structs mirror
//! the GraphQL shapes (camelCase, nested node wrappers); domain structs are
//! what the rest of the application consumes.

use chrono::NaiveDateTime;
use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// GraphQL envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<ServiceError>>,
}

/// One entry of the GraphQL `errors` array
#[derive(Debug, Deserialize)]
pub struct ServiceError {
    pub message: String,
}

/// Generic `{ nodes: [...] }` connection wrapper
#[derive(Debug, Deserialize)]
pub struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types (one per query document)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategoriesData {
    pub categories: NodeList<CategoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub name: String,
    pub slug: String,
    /// Per-category page size override (site custom field, often absent)
    pub posts_per_page: Option<u32>,
    /// Menu-visibility flag (site custom field, often absent)
    pub show_in_menu: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub posts: PostConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<PostNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub slug: String,
    pub status: Option<String>,
    pub link: Option<String>,
    pub author: Option<AuthorEdge>,
    pub featured_image: Option<FeaturedImageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorEdge {
    pub node: AuthorNode,
}

#[derive(Debug, Deserialize)]
pub struct AuthorNode {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedImageEdge {
    pub node: FeaturedImageNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImageNode {
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostByData {
    pub post_by: Option<PostNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfoData {
    pub all_settings: AllSettings,
    pub site_icon_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSettings {
    pub general_settings_title: Option<String>,
    pub general_settings_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfoData {
    pub posts_category_infos: CategoryInfoNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfoNode {
    pub posts_count_by_category_name: u32,
    pub posts_pages_by_category_name: u32,
}

#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
pub struct MediaData {
    #[serde(rename = "mediaItems")]
    pub media_items: NodeList<MediaNode>,
}

#[derive(Debug, Deserialize)]
pub struct MediaNode {
    pub link: Option<String>,
    pub caption: Option<String>,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: LoginPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub auth_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub register_user: RegisterPayload,
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub user: RegisteredUser,
}

#[derive(Debug, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub name: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain types
// ─────────────────────────────────────────────────────────────────────────────

/// The authenticated user's identity, from the viewer query
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// A content category. Loaded once at startup; immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub background_image_url: Option<String>,
    /// HTML-bearing caption; falls back to the site description
    pub caption: Option<String>,
    pub posts_per_page: Option<u32>,
}

/// A published post as shown in listings and the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub html_content: String,
    pub publish_date: Option<NaiveDateTime>,
    pub modified_date: Option<NaiveDateTime>,
    pub author_name: Option<String>,
    pub status: Option<String>,
    pub permalink: Option<String>,
    pub featured_image: Option<FeaturedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedImage {
    pub source_url: String,
    pub alt_text: Option<String>,
}

/// Forward-only pagination cursor, valid only for the category it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

impl From<PageInfo> for PageCursor {
    fn from(info: PageInfo) -> Self {
        Self {
            end_cursor: info.end_cursor,
            has_next_page: info.has_next_page,
        }
    }
}

/// One fetched page of posts together with the cursor it ended on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCursorPage {
    pub posts: Vec<Post>,
    pub cursor: PageCursor,
}

/// Site-wide settings fetched once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub icon_link: Option<String>,
}

impl From<SiteInfoData> for SiteInfo {
    fn from(data: SiteInfoData) -> Self {
        Self {
            title: data.all_settings.general_settings_title.unwrap_or_default(),
            description: data
                .all_settings
                .general_settings_description
                .unwrap_or_default(),
            icon_link: data.site_icon_link,
        }
    }
}

/// The API returns dates without a timezone suffix ("2024-03-01T09:30:00")
fn parse_api_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw?, "%Y-%m-%dT%H:%M:%S").ok()
}

impl From<PostNode> for Post {
    fn from(node: PostNode) -> Self {
        Self {
            title: node.title.unwrap_or_else(|| "Titre manquant".to_string()),
            html_content: node.content.unwrap_or_default(),
            publish_date: parse_api_date(node.date.as_deref()),
            modified_date: parse_api_date(node.modified.as_deref()),
            author_name: node.author.and_then(|a| a.node.name),
            status: node.status,
            permalink: node.link,
            featured_image: node.featured_image.and_then(|f| {
                f.node.source_url.map(|source_url| FeaturedImage {
                    source_url,
                    alt_text: f.node.alt_text,
                })
            }),
            slug: node.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_payload_deserializes_wire_shape() {
        let raw = r#"{
            "posts": {
                "nodes": [{
                    "title": "Assemblée générale",
                    "content": "<p>Compte-rendu</p>",
                    "date": "2024-03-01T09:30:00",
                    "modified": "2024-03-02T08:00:00",
                    "slug": "assemblee-generale",
                    "status": "publish",
                    "link": "https://example.org/assemblee-generale",
                    "author": { "node": { "name": "Martin" } }
                }],
                "pageInfo": { "endCursor": "YXJyYXk=", "hasNextPage": true }
            }
        }"#;
        let data: PostsData = serde_json::from_str(raw).expect("valid posts payload");
        assert_eq!(data.posts.nodes.len(), 1);
        assert_eq!(data.posts.page_info.end_cursor.as_deref(), Some("YXJyYXk="));
        assert!(data.posts.page_info.has_next_page);

        let post = Post::from(data.posts.nodes.into_iter().next().unwrap());
        assert_eq!(post.title, "Assemblée générale");
        assert_eq!(post.author_name.as_deref(), Some("Martin"));
        assert!(post.publish_date.is_some());
    }

    #[test]
    fn test_post_without_title_gets_placeholder() {
        let raw = r#"{ "slug": "sans-titre" }"#;
        let node: PostNode = serde_json::from_str(raw).expect("valid post node");
        let post = Post::from(node);
        assert_eq!(post.title, "Titre manquant");
        assert_eq!(post.html_content, "");
    }

    #[test]
    fn test_envelope_with_errors_only() {
        let raw = r#"{ "data": null, "errors": [{ "message": "invalid_username" }] }"#;
        let envelope: Envelope<ViewerData> = serde_json::from_str(raw).expect("valid envelope");
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.unwrap()[0].message, "invalid_username");
    }

    #[test]
    fn test_page_info_converts_to_cursor() {
        let info = PageInfo {
            end_cursor: Some("abc".to_string()),
            has_next_page: false,
        };
        let cursor = PageCursor::from(info);
        assert_eq!(cursor.end_cursor.as_deref(), Some("abc"));
        assert!(!cursor.has_next_page);
    }

    #[test]
    fn test_site_info_defaults_empty_strings() {
        let raw = r#"{ "allSettings": {}, "siteIconLink": null }"#;
        let data: SiteInfoData = serde_json::from_str(raw).expect("valid settings payload");
        let info = SiteInfo::from(data);
        assert_eq!(info.title, "");
        assert_eq!(info.description, "");
    }
}
