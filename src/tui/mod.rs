// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, app events)
// - Key dispatch: form views capture text input; everything else is
//   navigation and listing intents

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod ui;

use crate::config::Config;
use crate::events::AppEvent;
use crate::fetch::FetchContext;
use crate::listing::Intent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, CredentialField, Detail, SignupField, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// The event loop handles keyboard input, timer ticks, and app events
/// from background fetch tasks.
pub async fn run_tui(
    mut event_rx: mpsc::Receiver<AppEvent>,
    log_buffer: LogBuffer,
    config: Config,
    fetch: FetchContext,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(fetch, log_buffer, config.default_page_size);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three things at once via tokio::select!:
/// 1. Keyboard input (navigation, forms)
/// 2. Timer ticks (periodic redraws, toast expiry)
/// 3. App events from background fetch tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Periodic redraws at 5 FPS keep the uptime and spinners fresh
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Background fetch completions
            Some(app_event) = event_rx.recv() => {
                app.handle_app_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Form views capture input first; browse views share one handler
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match app.view {
        View::Login => handle_login_keys(app, key_event),
        View::Signup => handle_signup_keys(app, key_event),
        _ => handle_browse_keys(app, key_event),
    }
}

/// Keys for the Home, PostDetail, ForgotPassword, and NotFound views
fn handle_browse_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        KeyCode::Esc | KeyCode::Backspace => {
            if app.should_debounce_action() {
                return;
            }
            if app.view != View::Home {
                app.detail = Detail::Empty;
                app.set_view(View::Home);
            }
        }
        // Category menu
        KeyCode::Tab => app.cycle_category(true),
        KeyCode::BackTab => app.cycle_category(false),
        // Account: login form, or logout when already authenticated
        KeyCode::Char('a') | KeyCode::Char('A') => {
            if !app.should_debounce_action() {
                app.toggle_account();
            }
        }
        // Reload the catalog after a failed start
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if app.view == View::Home && !app.should_debounce_action() {
                app.reload_catalog();
            }
        }
        _ => match app.view {
            View::Home => handle_home_keys(app, key_event),
            View::PostDetail => handle_detail_keys(app, key_event),
            _ => {}
        },
    }
}

fn handle_home_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next_post(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_post(),
        KeyCode::Enter => {
            if !app.should_debounce_action() {
                app.open_selected_post();
            }
        }
        // Pagination intents; no-ops are decided by the listing controller
        KeyCode::Right | KeyCode::Char('n') => app.paginate(Intent::NextPage),
        KeyCode::Left | KeyCode::Char('p') => app.paginate(Intent::PreviousPage),
        KeyCode::Char('g') | KeyCode::Home => app.paginate(Intent::FirstPage),
        KeyCode::Char('G') | KeyCode::End => app.paginate(Intent::LastPage),
        _ => {}
    }
}

fn handle_detail_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.detail_scroll = app.detail_scroll.saturating_add(10);
        }
        KeyCode::PageUp => {
            app.detail_scroll = app.detail_scroll.saturating_sub(10);
        }
        // Copy the permalink
        KeyCode::Char('y') => {
            if let Detail::Loaded(post) = &app.detail {
                match &post.permalink {
                    Some(permalink) => {
                        if clipboard::copy_to_clipboard(permalink).is_ok() {
                            app.show_toast("✓ Lien copié");
                        } else {
                            app.show_toast("✗ Copie impossible");
                        }
                    }
                    None => app.show_toast("Pas de lien pour cet article"),
                }
            }
        }
        _ => {}
    }
}

fn handle_login_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => {
            app.login_form.reset();
            app.set_view(View::Home);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.login_form.toggle_focus();
        }
        KeyCode::Enter => {
            if !app.should_debounce_action() {
                app.submit_login();
            }
        }
        KeyCode::F(2) => {
            app.signup_form.reset();
            app.set_view(View::Signup);
        }
        KeyCode::F(3) => {
            app.set_view(View::ForgotPassword);
        }
        code => {
            let form = &mut app.login_form;
            let field = match form.focus {
                CredentialField::Username => &mut form.username,
                CredentialField::Password => &mut form.password,
            };
            field.handle_key(code);
        }
    }
}

fn handle_signup_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => {
            app.signup_form.reset();
            app.set_view(View::Login);
        }
        KeyCode::Tab | KeyCode::Down => app.signup_form.next_focus(),
        KeyCode::Enter => {
            if !app.should_debounce_action() {
                app.submit_signup();
            }
        }
        code => {
            let form = &mut app.signup_form;
            let field = match form.focus {
                SignupField::Username => &mut form.username,
                SignupField::Email => &mut form.email,
                SignupField::Password => &mut form.password,
            };
            field.handle_key(code);
        }
    }
}
