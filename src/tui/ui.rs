// Top-level layout and view dispatch
//
// Fixed chrome (header, optional error banner, status bar) around a main
// area that changes with the active view.

use crate::tui::app::{App, View};
use crate::tui::components;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    let banner_height = if app.error_banner.is_some() && app.view == View::Home {
        3
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // header: title + menu
            Constraint::Length(banner_height),  // error banner when present
            Constraint::Min(0),                 // main view
            Constraint::Length(2),              // status bar
        ])
        .split(f.area());

    components::header::render(f, rows[0], app);
    if banner_height > 0 {
        components::error_banner::render(f, rows[1], app);
    }

    match app.view {
        View::Home => {
            let main = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(2)])
                .split(rows[2]);
            components::post_list::render(f, main[0], app);
            components::pagination_bar::render(f, main[1], app);
        }
        View::PostDetail => components::post_detail::render(f, rows[2], app),
        View::Login => components::login_form::render(f, rows[2], app),
        View::Signup => components::signup_form::render(f, rows[2], app),
        View::ForgotPassword => components::forgot_password::render(f, rows[2], app),
        View::NotFound => components::not_found::render(f, rows[2], app),
    }

    components::status_bar::render(f, rows[3], app);
}
