// UI components
//
// One file per panel; each exposes a render(frame, area, app) function that
// reads app state and draws. No component mutates state.

pub mod error_banner;
pub mod forgot_password;
pub mod formatters;
pub mod header;
pub mod login_form;
pub mod not_found;
pub mod pagination_bar;
pub mod post_detail;
pub mod post_list;
pub mod signup_form;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered sub-rectangle for form panels
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
