//! Pagination and listing controller
//!
//! The one genuinely stateful piece of the client. `Listing` is a pure
//! state machine: user intents go in through [`Listing::apply`], which
//! mutates local state and returns the fetch (if any) the caller must run;
//! fetch outcomes come back through [`Listing::complete`] /
//! [`Listing::fail`] / [`Listing::set_page_count`]. Nothing here touches
//! the network or the terminal, so the whole machine is testable in
//! isolation.
//!
//! Two guards protect against overlapping requests:
//! - every fetch carries a monotonically increasing generation; an outcome
//!   stamped with a stale generation is discarded, so a slow response for a
//!   previous category can never overwrite the current one;
//! - pagination intents are ignored while a listing fetch is in flight
//!   (category switches are always honored and take over the generation).

use crate::api::models::{PageCursor, Post};

/// Where the listing currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No category selected yet
    Idle,
    /// A listing fetch is in flight
    Loading,
    /// Posts on screen match the cursor
    Loaded,
    /// The last fetch failed; prior posts are cleared
    Error(String),
}

/// User intents the controller understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch the active category and fetch its first page
    SelectCategory(String),
    /// Back to page 1 of the current category
    FirstPage,
    /// The API offers no backward cursor seeking, so "previous" is
    /// implemented as a reset to page 1
    PreviousPage,
    /// Advance using the stored cursor
    NextPage,
    /// Best-effort jump: uses the slug of the last loaded post as the
    /// pagination token, which is only correct when the tail is already
    /// loaded
    LastPage,
}

/// A fetch the caller must run on behalf of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSpec {
    /// Generation stamp; completions must echo it back
    pub generation: u64,
    /// Category slug to query
    pub category: String,
    /// Page size for this fetch
    pub first: u32,
    /// Pagination token; `None` requests the first page
    pub after: Option<String>,
    /// Whether to also run the separate page-count query
    pub with_page_count: bool,
}

/// Listing state for the active category
#[derive(Debug, Clone)]
pub struct Listing {
    pub active_category: Option<String>,
    /// 1-based page number
    pub current_page: u32,
    pub posts: Vec<Post>,
    pub cursor: PageCursor,
    /// From the separate count query; display-only plus control gating
    pub total_pages: Option<u32>,
    pub total_posts: Option<u32>,
    pub phase: Phase,
    default_page_size: u32,
    page_size_override: Option<u32>,
    generation: u64,
}

impl Listing {
    pub fn new(default_page_size: u32) -> Self {
        Self {
            active_category: None,
            current_page: 1,
            posts: Vec::new(),
            cursor: PageCursor::default(),
            total_pages: None,
            total_posts: None,
            phase: Phase::Idle,
            default_page_size,
            page_size_override: None,
            generation: 0,
        }
    }

    /// Effective page size: category override, else the site default.
    /// Changes take effect on the next fetch, never retroactively.
    pub fn page_size(&self) -> u32 {
        self.page_size_override.unwrap_or(self.default_page_size)
    }

    /// Install (or clear) the active category's page-size override.
    /// Callers set this when resolving a `SelectCategory` intent.
    pub fn set_page_size_override(&mut self, posts_per_page: Option<u32>) {
        self.page_size_override = posts_per_page;
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    fn at_last_page(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.current_page >= total)
    }

    /// "First" and "previous" controls are enabled past page 1
    pub fn can_go_back(&self) -> bool {
        self.active_category.is_some() && self.current_page > 1
    }

    /// "Next" is enabled when the cursor has a next page and the count
    /// query (when resolved) doesn't say we're on the last page
    pub fn can_go_next(&self) -> bool {
        self.active_category.is_some() && self.cursor.has_next_page && !self.at_last_page()
    }

    /// "Last" needs a known page count, a loaded tail to take the token
    /// from, and somewhere to go
    pub fn can_go_last(&self) -> bool {
        self.active_category.is_some()
            && self.total_pages.is_some()
            && !self.at_last_page()
            && !self.posts.is_empty()
    }

    /// Feed one intent through the machine. Returns the fetch to run, or
    /// `None` when the intent is a no-op in the current state.
    pub fn apply(&mut self, intent: Intent) -> Option<FetchSpec> {
        match intent {
            Intent::SelectCategory(slug) => Some(self.select_category(slug)),
            // Pagination within a category is ignored while a fetch is in
            // flight; only a category switch may take over
            _ if self.is_loading() => None,
            Intent::FirstPage | Intent::PreviousPage => {
                if !self.can_go_back() {
                    return None;
                }
                Some(self.reset_to_first_page())
            }
            Intent::NextPage => {
                if !self.can_go_next() {
                    return None;
                }
                let after = self.cursor.end_cursor.clone()?;
                self.current_page += 1;
                self.phase = Phase::Loading;
                Some(self.fetch_spec(Some(after), false))
            }
            Intent::LastPage => {
                if !self.can_go_last() {
                    return None;
                }
                let after = self.posts.last().map(|post| post.slug.clone())?;
                self.current_page = self.total_pages.unwrap_or(self.current_page);
                self.phase = Phase::Loading;
                Some(self.fetch_spec(Some(after), false))
            }
        }
    }

    /// Category switch: page 1, no cursor, empty grid, fresh generation,
    /// and the count query re-runs for the new category
    fn select_category(&mut self, slug: String) -> FetchSpec {
        self.active_category = Some(slug);
        self.current_page = 1;
        self.posts.clear();
        self.cursor = PageCursor::default();
        self.total_pages = None;
        self.total_posts = None;
        self.phase = Phase::Loading;
        self.fetch_spec(None, true)
    }

    fn reset_to_first_page(&mut self) -> FetchSpec {
        self.current_page = 1;
        self.posts.clear();
        self.cursor = PageCursor::default();
        self.phase = Phase::Loading;
        self.fetch_spec(None, false)
    }

    fn fetch_spec(&mut self, after: Option<String>, with_page_count: bool) -> FetchSpec {
        self.generation += 1;
        FetchSpec {
            generation: self.generation,
            category: self
                .active_category
                .clone()
                .unwrap_or_default(),
            first: self.page_size(),
            after,
            with_page_count,
        }
    }

    /// A page arrived. Stale generations are discarded and return false.
    /// Fresh posts replace the visible set wholesale.
    pub fn complete(&mut self, generation: u64, posts: Vec<Post>, cursor: PageCursor) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale listing response"
            );
            return false;
        }
        self.posts = posts;
        self.cursor = cursor;
        self.phase = Phase::Loaded;
        true
    }

    /// A fetch failed. Prior posts are cleared; the error banner shows the
    /// message. Stale generations are discarded.
    pub fn fail(&mut self, generation: u64, message: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.posts.clear();
        self.cursor = PageCursor::default();
        self.phase = Phase::Error(message);
        true
    }

    /// The separate count query resolved. Stamped with the generation of
    /// the `SelectCategory` fetch that requested it, so a count for a
    /// previously active category is discarded.
    pub fn set_page_count(&mut self, generation: u64, total_posts: u32, total_pages: u32) -> bool {
        if generation != self.generation {
            return false;
        }
        self.total_posts = Some(total_posts);
        self.total_pages = Some(total_pages);
        true
    }

    /// "Page X / N" indicator; N is omitted until the count query resolves
    pub fn page_indicator(&self) -> String {
        match self.total_pages {
            Some(total) => format!("Page {} / {}", self.current_page, total),
            None => format!("Page {}", self.current_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("Post {}", slug),
            html_content: "<p>contenu</p>".to_string(),
            publish_date: None,
            modified_date: None,
            author_name: None,
            status: Some("publish".to_string()),
            permalink: None,
            featured_image: None,
        }
    }

    fn posts(n: usize) -> Vec<Post> {
        (0..n).map(|i| post(&format!("post-{}", i))).collect()
    }

    fn cursor(end: &str, has_next: bool) -> PageCursor {
        PageCursor {
            end_cursor: Some(end.to_string()),
            has_next_page: has_next,
        }
    }

    #[test]
    fn test_select_category_issues_cursorless_first_page_fetch() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("events".to_string()))
            .expect("category switch always fetches");

        assert_eq!(spec.category, "events");
        assert_eq!(spec.first, 12);
        assert_eq!(spec.after, None);
        assert!(spec.with_page_count);
        assert_eq!(listing.current_page, 1);
        assert!(listing.posts.is_empty());
        assert_eq!(listing.phase, Phase::Loading);

        // Twelve posts with a forward cursor: next enabled, back disabled
        assert!(listing.complete(spec.generation, posts(12), cursor("cursorA", true)));
        assert_eq!(listing.posts.len(), 12);
        assert_eq!(listing.current_page, 1);
        assert!(listing.can_go_next());
        assert!(!listing.can_go_back());
    }

    #[test]
    fn test_next_page_passes_stored_cursor_and_final_page_disables_next() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("events".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));
        listing.set_page_count(spec.generation, 18, 2);

        let next = listing.apply(Intent::NextPage).expect("next is enabled");
        assert_eq!(next.after.as_deref(), Some("cursorA"));
        assert!(!next.with_page_count);
        assert_eq!(listing.current_page, 2);

        // Tail page: cursor exhausted
        listing.complete(
            next.generation,
            posts(6),
            PageCursor {
                end_cursor: None,
                has_next_page: false,
            },
        );
        assert!(!listing.can_go_next());
        assert!(!listing.can_go_last());
        assert_eq!(listing.posts.len(), 6);
    }

    #[test]
    fn test_next_is_noop_on_last_counted_page_even_with_cursor() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        // The cursor claims more data, but the count query says page 1 of 1
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));
        listing.set_page_count(spec.generation, 12, 1);

        assert!(!listing.can_go_next());
        assert_eq!(listing.apply(Intent::NextPage), None);
    }

    #[test]
    fn test_first_and_previous_are_noops_on_page_one() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));

        assert!(!listing.can_go_back());
        assert_eq!(listing.apply(Intent::FirstPage), None);
        assert_eq!(listing.apply(Intent::PreviousPage), None);
    }

    #[test]
    fn test_previous_resets_to_cursorless_first_page() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));
        let next = listing.apply(Intent::NextPage).unwrap();
        listing.complete(next.generation, posts(12), cursor("cursorB", true));
        assert_eq!(listing.current_page, 2);

        let prev = listing.apply(Intent::PreviousPage).expect("back enabled");
        assert_eq!(prev.after, None);
        assert_eq!(listing.current_page, 1);
        assert!(listing.posts.is_empty());
    }

    #[test]
    fn test_last_page_uses_slug_of_last_loaded_post() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));
        listing.set_page_count(spec.generation, 30, 3);

        let last = listing.apply(Intent::LastPage).expect("last enabled");
        assert_eq!(last.after.as_deref(), Some("post-11"));
        assert_eq!(listing.current_page, 3);

        // Already on the last page: no-op
        listing.complete(last.generation, posts(6), cursor("cursorZ", false));
        assert_eq!(listing.apply(Intent::LastPage), None);
    }

    #[test]
    fn test_category_switch_clears_posts_before_data_arrives() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));
        let next = listing.apply(Intent::NextPage).unwrap();
        listing.complete(next.generation, posts(12), cursor("cursorB", true));

        listing
            .apply(Intent::SelectCategory("events".to_string()))
            .unwrap();
        assert_eq!(listing.current_page, 1);
        assert!(listing.posts.is_empty());
        assert_eq!(listing.total_pages, None);
        assert_eq!(listing.phase, Phase::Loading);
    }

    #[test]
    fn test_stale_response_for_previous_category_is_discarded() {
        let mut listing = Listing::new(12);
        let news = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        // User switches again before the first fetch lands
        let events = listing
            .apply(Intent::SelectCategory("events".to_string()))
            .unwrap();

        // The slow news response must not overwrite events state
        assert!(!listing.complete(news.generation, posts(12), cursor("old", true)));
        assert!(listing.posts.is_empty());
        assert_eq!(listing.active_category.as_deref(), Some("events"));

        // The count query for news is equally stale
        assert!(!listing.set_page_count(news.generation, 99, 9));
        assert_eq!(listing.total_pages, None);

        // The events response applies normally
        assert!(listing.complete(events.generation, posts(3), cursor("fresh", false)));
        assert_eq!(listing.posts.len(), 3);
    }

    #[test]
    fn test_pagination_intents_ignored_while_loading() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));

        let next = listing.apply(Intent::NextPage).unwrap();
        // Fetch in flight: repeated clicks are swallowed
        assert_eq!(listing.apply(Intent::NextPage), None);
        assert_eq!(listing.apply(Intent::FirstPage), None);
        assert_eq!(listing.apply(Intent::LastPage), None);

        listing.complete(next.generation, posts(12), cursor("cursorB", true));
        assert_eq!(listing.current_page, 2);
    }

    #[test]
    fn test_category_page_size_override_takes_effect_on_next_fetch() {
        let mut listing = Listing::new(12);
        listing.set_page_size_override(Some(6));
        let spec = listing
            .apply(Intent::SelectCategory("forum".to_string()))
            .unwrap();
        assert_eq!(spec.first, 6);

        listing.set_page_size_override(None);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        assert_eq!(spec.first, 12);
    }

    #[test]
    fn test_failure_clears_posts_and_reports_message() {
        let mut listing = Listing::new(12);
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.complete(spec.generation, posts(12), cursor("cursorA", true));

        let next = listing.apply(Intent::NextPage).unwrap();
        assert!(listing.fail(next.generation, "network error: timeout".to_string()));
        assert!(listing.posts.is_empty());
        assert_eq!(
            listing.phase,
            Phase::Error("network error: timeout".to_string())
        );
    }

    #[test]
    fn test_page_indicator_formats() {
        let mut listing = Listing::new(12);
        assert_eq!(listing.page_indicator(), "Page 1");
        let spec = listing
            .apply(Intent::SelectCategory("news".to_string()))
            .unwrap();
        listing.set_page_count(spec.generation, 30, 3);
        assert_eq!(listing.page_indicator(), "Page 1 / 3");
    }
}
