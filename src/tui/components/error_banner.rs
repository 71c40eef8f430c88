// Inline error banner for auth and data-fetch failures
//
// Messages reaching this component have already been entity-decoded and
// escaped by the session layer; the banner renders plain text only.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the banner when an error is present
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(message) = &app.error_banner else {
        return;
    };

    let banner = Paragraph::new(message.as_str())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Erreur "),
        );
    f.render_widget(banner, area);
}
