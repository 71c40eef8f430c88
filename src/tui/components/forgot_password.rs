// Account recovery pointer
//
// Password resets happen on the site itself, not through this client.

use crate::tui::app::App;
use crate::tui::components::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the recovery instructions
pub fn render(f: &mut Frame, area: Rect, _app: &App) {
    let panel = centered_rect(64, 9, area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  La réinitialisation du mot de passe se fait sur le site,"),
        Line::raw("  via le lien « Mot de passe oublié ? » de la page de connexion."),
        Line::raw(""),
        Line::raw("  Sans accès à votre adresse e-mail, contactez le secrétariat."),
        Line::raw(""),
        Line::from(Span::styled(
            "  Esc retour",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Mot de passe oublié "),
        );
    f.render_widget(Clear, panel);
    f.render_widget(widget, panel);
}
