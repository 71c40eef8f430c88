//! Content API client
//!
//! Wraps GraphQL-over-HTTP calls to the remote content service. Every
//! operation POSTs a `{query, variables}` document, attaches a bearer header
//! when a session token is supplied, and deserializes the `{data, errors}`
//! envelope into the typed schemas in [`models`]. Transport and service
//! failures are logged here and converted into [`ApiError`] variants; no
//! call is retried.

pub mod models;
pub mod queries;

use crate::error::ApiError;
use models::{
    CategoriesData, CategoryInfoData, CategoryNode, Envelope, LoginData, MediaData, MediaNode,
    Post, PostByData, PostCursorPage, PostsData, RegisterData, SiteInfo, SiteInfoData, Viewer,
    ViewerData,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Client for the remote content API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Execute one GraphQL document and unwrap the response envelope.
    ///
    /// Service errors win over missing data: if the `errors` array is
    /// non-empty its messages are joined and surfaced; an envelope with
    /// neither data nor errors is a malformed service response.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &'static str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(operation, error = %err, "transport failure");
            ApiError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(operation, %status, "content API returned an error status");
            return Err(ApiError::Transport(format!("HTTP {}", status)));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|err| {
            tracing::error!(operation, error = %err, "response body was not valid JSON");
            ApiError::from(err)
        })?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(operation, %message, "service-level error");
                return Err(ApiError::Service(message));
            }
        }

        envelope.data.ok_or_else(|| {
            tracing::error!(operation, "envelope carried neither data nor errors");
            ApiError::Service("empty response from content API".to_string())
        })
    }

    /// Full category set, in API order (no client-side resort)
    pub async fn categories(&self) -> Result<Vec<CategoryNode>, ApiError> {
        let data: CategoriesData = self
            .execute("categories", queries::LIST_CATEGORIES, json!({}), None)
            .await?;
        Ok(data.categories.nodes)
    }

    /// One page of posts for a category. `after` is the opaque cursor from
    /// the previous page; `None` requests the first page.
    pub async fn posts(
        &self,
        category_name: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<PostCursorPage, ApiError> {
        let data: PostsData = self
            .execute(
                "posts",
                queries::LIST_POSTS,
                json!({ "categoryName": category_name, "first": first, "after": after }),
                None,
            )
            .await?;
        Ok(PostCursorPage {
            posts: data.posts.nodes.into_iter().map(Post::from).collect(),
            cursor: data.posts.page_info.into(),
        })
    }

    /// Post and page counts for a category at the given page size
    pub async fn category_page_info(
        &self,
        category_name: &str,
        posts_per_page: u32,
    ) -> Result<(u32, u32), ApiError> {
        let data: CategoryInfoData = self
            .execute(
                "category_page_info",
                queries::INFO_POSTS,
                json!({ "categoryName": category_name, "postsPerPage": posts_per_page }),
                None,
            )
            .await?;
        let info = data.posts_category_infos;
        Ok((
            info.posts_count_by_category_name,
            info.posts_pages_by_category_name,
        ))
    }

    /// Single post by slug. `Ok(None)` means the post does not exist.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, ApiError> {
        let data: PostByData = self
            .execute(
                "post_by_slug",
                queries::GET_POST_BY_SLUG,
                json!({ "slug": slug }),
                None,
            )
            .await?;
        Ok(data.post_by.map(Post::from))
    }

    /// Site title/description/icon
    pub async fn site_info(&self) -> Result<SiteInfo, ApiError> {
        let data: SiteInfoData = self
            .execute("site_info", queries::SITE_INFO, json!({}), None)
            .await?;
        Ok(SiteInfo::from(data))
    }

    /// Media items whose slug is in `slugs` (category background lookup)
    pub async fn media_items(&self, slugs: &[String]) -> Result<Vec<MediaNode>, ApiError> {
        let data: MediaData = self
            .execute(
                "media_items",
                queries::LIST_BACKGROUND_IMAGES,
                json!({ "slugs": slugs }),
                None,
            )
            .await?;
        Ok(data.media_items.nodes)
    }

    /// Identity of the token holder. A valid token yields the viewer; an
    /// expired or unknown token is a service error.
    pub async fn viewer(&self, token: &str) -> Result<Viewer, ApiError> {
        let data: ViewerData = self
            .execute("viewer", queries::VIEWER, json!({}), Some(token))
            .await?;
        data.viewer
            .ok_or_else(|| ApiError::Service("viewer unavailable for this token".to_string()))
    }

    /// Exchange credentials for an auth token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let data: LoginData = self
            .execute(
                "login",
                queries::LOGIN,
                json!({ "username": username, "password": password }),
                None,
            )
            .await?;
        Ok(data.login.auth_token)
    }

    /// Register a new account; returns the display name of the created user
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let data: RegisterData = self
            .execute(
                "register",
                queries::REGISTER,
                json!({ "username": username, "email": email, "password": password }),
                None,
            )
            .await?;
        Ok(data
            .register_user
            .user
            .name
            .unwrap_or(data.register_user.user.id))
    }
}
