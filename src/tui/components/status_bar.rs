// Status bar component
//
// Bottom line: uptime, current view, session state, page indicator, and
// either the active toast or the most recent warning from the log buffer.

use crate::tui::app::App;
use crate::tui::components::formatters::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let user = if app.session.is_logged_in {
        match &app.session.current_user {
            Some(viewer) => format!("👤 {}", viewer.name),
            None => "👤 connecté".to_string(),
        }
    } else {
        "anonyme".to_string()
    };

    let mut status = format!(
        " {} │ {} │ {} │ {}",
        app.uptime(),
        app.view.name(),
        user,
        app.listing.page_indicator(),
    );

    // Toast wins over the last warning; both are transient hints
    if let Some((toast, _)) = &app.toast {
        status.push_str(&format!(" │ {}", toast));
    } else if let Some(entry) = app.log_buffer.last_warning() {
        status.push_str(&format!(" │ {} {}", entry.level.as_str(), entry.message));
    }

    let bar = Paragraph::new(truncate_to_width(&status, area.width as usize))
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(bar, area);
}
