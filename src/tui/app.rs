// TUI application state
//
// Holds everything the renderer reads: the catalog, the listing state
// machine, session state, the active view, and form state. Key handlers
// translate input into listing intents or spawned fetches; app events from
// background tasks come back through handle_app_event.

use crate::api::models::Post;
use crate::catalog::Catalog;
use crate::events::AppEvent;
use crate::fetch::FetchContext;
use crate::listing::{Intent, Listing, Phase};
use crate::logging::LogBuffer;
use crate::session::SessionState;
use crate::tui::input::TextInput;
use std::time::{Duration, Instant};

/// Different views the TUI can display, mirroring the site's routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home, // Category menu + post listing
    PostDetail,     // Single post by slug
    Login,          // Credentials form
    Signup,         // Registration form
    ForgotPassword, // Account recovery pointer
    NotFound,       // Missing post / unexpected errors
}

impl View {
    /// Get display name for the status bar
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "Accueil",
            View::PostDetail => "Article",
            View::Login => "Connexion",
            View::Signup => "Inscription",
            View::ForgotPassword => "Mot de passe oublié",
            View::NotFound => "Page non trouvée",
        }
    }
}

/// Debounce duration for action keys (Enter, Esc)
/// Prevents rapid-fire triggers on terminals that don't send release events
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// How long toast notifications stay on screen
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Detail view lifecycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Detail {
    #[default]
    Empty,
    Loading(String),
    Loaded(Post),
}

/// Which login form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialField {
    #[default]
    Username,
    Password,
}

/// Login form state
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: CredentialField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            CredentialField::Username => CredentialField::Password,
            CredentialField::Password => CredentialField::Username,
        };
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = CredentialField::Username;
        self.error = None;
        self.submitting = false;
    }
}

/// Which signup form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupField {
    #[default]
    Username,
    Email,
    Password,
}

/// Registration form state
#[derive(Debug, Default)]
pub struct SignupForm {
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub focus: SignupField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl SignupForm {
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            SignupField::Username => SignupField::Email,
            SignupField::Email => SignupField::Password,
            SignupField::Password => SignupField::Username,
        };
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.focus = SignupField::Username;
        self.error = None;
        self.submitting = false;
    }
}

/// Main application state for the TUI
pub struct App {
    /// Current view being displayed
    pub view: View,

    /// Loaded category catalog (None until the load resolves)
    pub catalog: Option<Catalog>,

    /// Catalog load failure, shown in place of the menu
    pub catalog_error: Option<String>,

    /// The pagination/listing state machine
    pub listing: Listing,

    /// Authentication state
    pub session: SessionState,

    /// Menu highlight: index into catalog.categories
    pub selected_category: Option<usize>,

    /// Listing highlight: index into listing.posts
    pub selected_post: usize,

    /// Inline error banner (data-fetch failures)
    pub error_banner: Option<String>,

    /// Detail view state
    pub detail: Detail,

    /// Scroll offset for the detail view
    pub detail_scroll: u16,

    pub login_form: LoginForm,
    pub signup_form: SignupForm,

    /// Transient notification with its creation time
    pub toast: Option<(String, Instant)>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Log buffer for the status bar's last-warning display
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Dispatcher for background fetches
    fetch: FetchContext,

    /// Last time an action key was triggered (for debouncing)
    last_action_time: Option<Instant>,
}

impl App {
    pub fn new(fetch: FetchContext, log_buffer: LogBuffer, default_page_size: u32) -> Self {
        Self {
            view: View::default(),
            catalog: None,
            catalog_error: None,
            listing: Listing::new(default_page_size),
            session: SessionState::default(),
            selected_category: None,
            selected_post: 0,
            error_banner: None,
            detail: Detail::Empty,
            detail_scroll: 0,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            toast: None,
            should_quit: false,
            log_buffer,
            start_time: Instant::now(),
            fetch,
            last_action_time: None,
        }
    }

    /// Check if an action should be debounced
    /// Returns true if action should be blocked (too soon since last action)
    pub fn should_debounce_action(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_action_time {
            if now.duration_since(last) < ACTION_DEBOUNCE {
                return true;
            }
        }
        self.last_action_time = Some(now);
        false
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    /// Called on every tick: expire stale toasts
    pub fn tick(&mut self) {
        if let Some((_, created)) = &self.toast {
            if created.elapsed() > TOAST_DURATION {
                self.toast = None;
            }
        }
    }

    /// Uptime as HH:MM:SS for the status bar
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    // ── Category and pagination intents ──────────────────────────────────

    /// Activate the category at `index` in the catalog menu
    pub fn select_category(&mut self, index: usize) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let Some(category) = catalog.categories.get(index) else {
            return;
        };

        self.selected_category = Some(index);
        self.selected_post = 0;
        self.error_banner = None;

        // The category's own page size wins over the site default,
        // starting with this fetch
        self.listing
            .set_page_size_override(category.posts_per_page);
        let slug = category.slug.clone();
        if let Some(spec) = self.listing.apply(Intent::SelectCategory(slug)) {
            self.fetch.spawn_listing_fetch(spec);
        }
    }

    /// Move the category highlight and activate the neighbor
    pub fn cycle_category(&mut self, forward: bool) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let count = catalog.categories.len();
        if count == 0 {
            return;
        }
        let next = match self.selected_category {
            None => 0,
            Some(current) if forward => (current + 1) % count,
            Some(current) => (current + count - 1) % count,
        };
        self.select_category(next);
    }

    /// Re-run the catalog load (after a failed start)
    pub fn reload_catalog(&mut self) {
        self.catalog_error = None;
        self.error_banner = None;
        self.fetch.spawn_catalog_load();
    }

    /// Feed a pagination intent through the listing machine
    pub fn paginate(&mut self, intent: Intent) {
        if let Some(spec) = self.listing.apply(intent) {
            self.selected_post = 0;
            self.error_banner = None;
            self.fetch.spawn_listing_fetch(spec);
        }
    }

    pub fn select_next_post(&mut self) {
        if self.selected_post + 1 < self.listing.posts.len() {
            self.selected_post += 1;
        }
    }

    pub fn select_previous_post(&mut self) {
        self.selected_post = self.selected_post.saturating_sub(1);
    }

    /// Open the highlighted post in the detail view (fetched by slug, like
    /// the site's permalink route)
    pub fn open_selected_post(&mut self) {
        let Some(post) = self.listing.posts.get(self.selected_post) else {
            return;
        };
        let slug = post.slug.clone();
        self.detail = Detail::Loading(slug.clone());
        self.detail_scroll = 0;
        self.set_view(View::PostDetail);
        self.fetch.spawn_post_fetch(slug);
    }

    // ── Auth intents ─────────────────────────────────────────────────────

    /// Account key: logged out opens the login form, logged in logs out
    pub fn toggle_account(&mut self) {
        if self.session.is_logged_in {
            self.logout();
        } else {
            self.login_form.reset();
            self.set_view(View::Login);
        }
    }

    pub fn submit_login(&mut self) {
        if self.login_form.submitting {
            return;
        }
        self.login_form.error = None;
        self.login_form.submitting = true;
        self.fetch.spawn_login(
            self.login_form.username.value().to_string(),
            self.login_form.password.value().to_string(),
        );
    }

    pub fn submit_signup(&mut self) {
        if self.signup_form.submitting {
            return;
        }
        self.signup_form.error = None;
        self.signup_form.submitting = true;
        self.fetch.spawn_register(
            self.signup_form.username.value().to_string(),
            self.signup_form.email.value().to_string(),
            self.signup_form.password.value().to_string(),
        );
    }

    pub fn logout(&mut self) {
        crate::session::logout(&self.fetch.cookies, &mut self.session);
        self.show_toast("Vous êtes déconnecté.");
        self.set_view(View::Home);
    }

    // ── Event handling ───────────────────────────────────────────────────

    /// Apply one completion from a background task
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded { site, categories } => {
                self.catalog_error = None;
                self.catalog = Some(Catalog { site, categories });
            }
            AppEvent::CatalogFailed { message } => {
                self.catalog_error = Some(message.clone());
                self.error_banner = Some(message);
            }
            AppEvent::PageLoaded {
                generation,
                posts,
                cursor,
            } => {
                if self.listing.complete(generation, posts, cursor) {
                    self.selected_post = 0;
                    self.error_banner = None;
                }
            }
            AppEvent::PageFailed {
                generation,
                message,
            } => {
                if self.listing.fail(generation, message.clone()) {
                    self.error_banner = Some(message);
                }
            }
            AppEvent::PageCountLoaded {
                generation,
                total_posts,
                total_pages,
            } => {
                self.listing
                    .set_page_count(generation, total_posts, total_pages);
            }
            AppEvent::PostLoaded { post } => {
                // Only adopt the post if the detail view is still waiting
                // for it; the user may have navigated away
                if matches!(&self.detail, Detail::Loading(slug) if *slug == post.slug) {
                    self.detail = Detail::Loaded(post);
                }
            }
            AppEvent::PostMissing { slug } => {
                if matches!(&self.detail, Detail::Loading(waiting) if *waiting == slug) {
                    self.detail = Detail::Empty;
                    self.set_view(View::NotFound);
                }
            }
            AppEvent::PostFailed { message } => {
                if matches!(self.detail, Detail::Loading(_)) {
                    self.detail = Detail::Empty;
                    self.error_banner = Some(message);
                    self.set_view(View::Home);
                }
            }
            AppEvent::SessionRestored { viewer } => {
                tracing::info!(user = %viewer.name, "session restored from cookie");
                self.session.authenticate(viewer);
            }
            AppEvent::SessionAbsent => {
                self.session.clear();
            }
            AppEvent::LoginSucceeded { viewer } => {
                self.login_form.reset();
                self.session.authenticate(viewer);
                self.show_toast("Connexion réussie.");
                self.set_view(View::Home);
            }
            AppEvent::LoginFailed { message } => {
                self.login_form.submitting = false;
                self.login_form.error = Some(message);
            }
            AppEvent::RegisterSucceeded { user_name } => {
                self.signup_form.reset();
                self.show_toast(format!("Compte créé pour {}.", user_name));
                self.login_form.reset();
                self.set_view(View::Login);
            }
            AppEvent::RegisterFailed { message } => {
                self.signup_form.submitting = false;
                self.signup_form.error = Some(message);
            }
        }
    }

    /// Loading indicator for the pagination bar
    pub fn listing_is_loading(&self) -> bool {
        self.listing.phase == Phase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{PageCursor, SiteInfo, Viewer};
    use crate::api::ApiClient;
    use crate::cookies::CookieStore;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(16);
        let fetch = FetchContext {
            api: Arc::new(ApiClient::new("http://localhost:0/graphql")),
            cookies: Arc::new(CookieStore::at_path(
                std::env::temp_dir().join("gazette-app-test-session.toml"),
                None,
            )),
            tx,
            demo_mode: true,
        };
        App::new(fetch, LogBuffer::new(), 12)
    }

    fn viewer() -> Viewer {
        Viewer {
            id: "dXNlcjox".to_string(),
            name: "Martin".to_string(),
            email: None,
        }
    }

    #[test]
    fn test_catalog_event_populates_menu() {
        let mut app = test_app();
        app.handle_app_event(AppEvent::CatalogLoaded {
            site: SiteInfo::default(),
            categories: Vec::new(),
        });
        assert!(app.catalog.is_some());
        assert!(app.catalog_error.is_none());
    }

    #[test]
    fn test_stale_page_event_does_not_move_selection() {
        let mut app = test_app();
        // No fetch was issued under generation 99: the completion is stale
        app.handle_app_event(AppEvent::PageLoaded {
            generation: 99,
            posts: Vec::new(),
            cursor: PageCursor::default(),
        });
        assert!(app.listing.posts.is_empty());
        assert_eq!(app.listing.phase, Phase::Idle);
    }

    #[test]
    fn test_login_success_authenticates_and_returns_home() {
        let mut app = test_app();
        app.set_view(View::Login);
        app.handle_app_event(AppEvent::LoginSucceeded { viewer: viewer() });
        assert!(app.session.is_logged_in);
        assert_eq!(app.view, View::Home);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_login_failure_stays_on_form_with_message() {
        let mut app = test_app();
        app.set_view(View::Login);
        app.login_form.submitting = true;
        app.handle_app_event(AppEvent::LoginFailed {
            message: "mot de passe incorrect".to_string(),
        });
        assert_eq!(app.view, View::Login);
        assert!(!app.login_form.submitting);
        assert_eq!(
            app.login_form.error.as_deref(),
            Some("mot de passe incorrect")
        );
    }

    #[test]
    fn test_missing_post_routes_to_not_found() {
        let mut app = test_app();
        app.detail = Detail::Loading("fantome".to_string());
        app.set_view(View::PostDetail);
        app.handle_app_event(AppEvent::PostMissing {
            slug: "fantome".to_string(),
        });
        assert_eq!(app.view, View::NotFound);
    }

    #[test]
    fn test_post_for_abandoned_detail_is_ignored() {
        let mut app = test_app();
        // User opened then left the detail view
        app.detail = Detail::Empty;
        app.handle_app_event(AppEvent::PostLoaded {
            post: crate::demo::post_by_slug("news-1").unwrap(),
        });
        assert_eq!(app.detail, Detail::Empty);
    }

    #[test]
    fn test_logout_clears_session_and_returns_home() {
        let mut app = test_app();
        app.session.authenticate(viewer());
        app.set_view(View::PostDetail);
        app.logout();
        assert!(!app.session.is_logged_in);
        assert_eq!(app.view, View::Home);
    }
}
