//! Background fetch dispatch
//!
//! The TUI never awaits the network. Every remote operation is spawned
//! here as a tokio task that reports its outcome as an [`AppEvent`] over
//! the app channel. Listing fetches echo back the generation stamp from
//! their [`FetchSpec`] so the controller can discard stale completions.
//! In demo mode the same entry points serve fixture content after a short
//! simulated latency.

use crate::api::ApiClient;
use crate::cookies::CookieStore;
use crate::demo;
use crate::events::AppEvent;
use crate::listing::FetchSpec;
use crate::session;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Everything a spawned fetch task needs, cheap to clone
#[derive(Clone)]
pub struct FetchContext {
    pub api: Arc<ApiClient>,
    pub cookies: Arc<CookieStore>,
    pub tx: mpsc::Sender<AppEvent>,
    pub demo_mode: bool,
}

impl FetchContext {
    async fn demo_latency() {
        tokio::time::sleep(Duration::from_millis(demo::DEMO_LATENCY_MS)).await;
    }

    /// Load site info, categories, and background media
    pub fn spawn_catalog_load(&self) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                Self::demo_latency().await;
                let catalog = demo::catalog();
                let _ = ctx
                    .tx
                    .send(AppEvent::CatalogLoaded {
                        site: catalog.site,
                        categories: catalog.categories,
                    })
                    .await;
                return;
            }

            match crate::catalog::load(&ctx.api).await {
                Ok(catalog) => {
                    let _ = ctx
                        .tx
                        .send(AppEvent::CatalogLoaded {
                            site: catalog.site,
                            categories: catalog.categories,
                        })
                        .await;
                }
                Err(err) => {
                    tracing::error!(error = %err, "catalog load failed");
                    let _ = ctx
                        .tx
                        .send(AppEvent::CatalogFailed {
                            message: session::format_error(&err),
                        })
                        .await;
                }
            }
        });
    }

    /// Run one listing fetch, plus the separate count query when the spec
    /// asks for it. Both completions carry the spec's generation.
    pub fn spawn_listing_fetch(&self, spec: FetchSpec) {
        let ctx = self.clone();
        let page_spec = spec.clone();
        tokio::spawn(async move {
            let FetchSpec {
                generation,
                category,
                first,
                after,
                ..
            } = page_spec;

            if ctx.demo_mode {
                Self::demo_latency().await;
                let (posts, cursor) = demo::page(&category, after.as_deref(), first);
                let _ = ctx
                    .tx
                    .send(AppEvent::PageLoaded {
                        generation,
                        posts,
                        cursor,
                    })
                    .await;
                return;
            }

            match ctx.api.posts(&category, first, after.as_deref()).await {
                Ok(page) => {
                    let _ = ctx
                        .tx
                        .send(AppEvent::PageLoaded {
                            generation,
                            posts: page.posts,
                            cursor: page.cursor,
                        })
                        .await;
                }
                Err(err) => {
                    tracing::error!(error = %err, category, "listing fetch failed");
                    let _ = ctx
                        .tx
                        .send(AppEvent::PageFailed {
                            generation,
                            message: session::format_error(&err),
                        })
                        .await;
                }
            }
        });

        if spec.with_page_count {
            self.spawn_page_count(spec);
        }
    }

    fn spawn_page_count(&self, spec: FetchSpec) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                Self::demo_latency().await;
                let (total_posts, total_pages) = demo::page_count(&spec.category, spec.first);
                let _ = ctx
                    .tx
                    .send(AppEvent::PageCountLoaded {
                        generation: spec.generation,
                        total_posts,
                        total_pages,
                    })
                    .await;
                return;
            }

            match ctx.api.category_page_info(&spec.category, spec.first).await {
                Ok((total_posts, total_pages)) => {
                    let _ = ctx
                        .tx
                        .send(AppEvent::PageCountLoaded {
                            generation: spec.generation,
                            total_posts,
                            total_pages,
                        })
                        .await;
                }
                Err(err) => {
                    // Counts are display-only; the listing stays usable
                    tracing::warn!(error = %err, category = spec.category, "count query failed");
                }
            }
        });
    }

    /// Fetch a single post for the detail view
    pub fn spawn_post_fetch(&self, slug: String) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                Self::demo_latency().await;
                let event = match demo::post_by_slug(&slug) {
                    Some(post) => AppEvent::PostLoaded { post },
                    None => AppEvent::PostMissing { slug },
                };
                let _ = ctx.tx.send(event).await;
                return;
            }

            let event = match ctx.api.post_by_slug(&slug).await {
                Ok(Some(post)) => AppEvent::PostLoaded { post },
                Ok(None) => AppEvent::PostMissing { slug },
                Err(err) => {
                    tracing::error!(error = %err, slug, "post fetch failed");
                    AppEvent::PostFailed {
                        message: session::format_error(&err),
                    }
                }
            };
            let _ = ctx.tx.send(event).await;
        });
    }

    /// Validate any stored token on startup
    pub fn spawn_session_restore(&self) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                let _ = ctx.tx.send(AppEvent::SessionAbsent).await;
                return;
            }

            let event = match session::restore(&ctx.api, &ctx.cookies).await {
                Some(viewer) => AppEvent::SessionRestored { viewer },
                None => AppEvent::SessionAbsent,
            };
            let _ = ctx.tx.send(event).await;
        });
    }

    /// Run the login flow. Validation failures surface through the same
    /// event without any request having been issued.
    pub fn spawn_login(&self, username: String, password: String) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                Self::demo_latency().await;
                let event = match session::validate_credentials(&username, &password) {
                    Ok(()) => AppEvent::LoginSucceeded {
                        viewer: demo::viewer(),
                    },
                    Err(err) => AppEvent::LoginFailed {
                        message: session::format_error(&err),
                    },
                };
                let _ = ctx.tx.send(event).await;
                return;
            }

            let event = match session::login(&ctx.api, &ctx.cookies, &username, &password).await {
                Ok(viewer) => AppEvent::LoginSucceeded { viewer },
                Err(err) => AppEvent::LoginFailed {
                    message: session::format_error(&err),
                },
            };
            let _ = ctx.tx.send(event).await;
        });
    }

    /// Run the registration flow
    pub fn spawn_register(&self, username: String, email: String, password: String) {
        let ctx = self.clone();
        tokio::spawn(async move {
            if ctx.demo_mode {
                Self::demo_latency().await;
                let event = match session::validate_credentials(&username, &password) {
                    Ok(()) => AppEvent::RegisterSucceeded {
                        user_name: username,
                    },
                    Err(err) => AppEvent::RegisterFailed {
                        message: session::format_error(&err),
                    },
                };
                let _ = ctx.tx.send(event).await;
                return;
            }

            let event = match session::register(&ctx.api, &username, &email, &password).await {
                Ok(user_name) => AppEvent::RegisterSucceeded { user_name },
                Err(err) => AppEvent::RegisterFailed {
                    message: session::format_error(&err),
                },
            };
            let _ = ctx.tx.send(event).await;
        });
    }
}
