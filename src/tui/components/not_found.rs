// 404 fallback view

use crate::tui::app::App;
use crate::tui::components::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the not-found fallback
pub fn render(f: &mut Frame, area: Rect, _app: &App) {
    let panel = centered_rect(54, 6, area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  La page que vous recherchez n'existe pas."),
        Line::raw(""),
        Line::from(Span::styled(
            "  Esc retour à l'accueil",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Page non trouvée "),
    );
    f.render_widget(Clear, panel);
    f.render_widget(widget, panel);
}
