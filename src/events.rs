// Events that flow from background fetch tasks to the TUI
//
// Every remote call runs in a spawned task and reports its outcome as one
// of these events over an mpsc channel. Listing events carry the fetch
// generation they were issued under so the listing controller can discard
// completions that arrive after the user has already moved on.

use crate::api::models::{Category, PageCursor, Post, SiteInfo, Viewer};

/// Main event type that flows through the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Category catalog, media backgrounds, and site info resolved
    CatalogLoaded {
        site: SiteInfo,
        categories: Vec<Category>,
    },

    /// Catalog could not be loaded; the catalog stays empty
    CatalogFailed { message: String },

    /// One page of posts arrived for the given fetch generation
    PageLoaded {
        generation: u64,
        posts: Vec<Post>,
        cursor: PageCursor,
    },

    /// A listing fetch failed
    PageFailed { generation: u64, message: String },

    /// The separate count query resolved for the given fetch generation
    PageCountLoaded {
        generation: u64,
        total_posts: u32,
        total_pages: u32,
    },

    /// A single post arrived for the detail view
    PostLoaded { post: Post },

    /// The requested post does not exist
    PostMissing { slug: String },

    /// The detail fetch failed
    PostFailed { message: String },

    /// The stored token resolved to a viewer identity at startup
    SessionRestored { viewer: Viewer },

    /// No usable session: token missing, expired, or rejected
    SessionAbsent,

    /// Login mutation + viewer lookup succeeded; the cookie is stored
    LoginSucceeded { viewer: Viewer },

    /// Login failed; message is already formatted for display
    LoginFailed { message: String },

    /// Registration succeeded for the given display name
    RegisterSucceeded { user_name: String },

    /// Registration failed; message is already formatted for display
    RegisterFailed { message: String },
}
