// Login form component

use crate::tui::app::{App, CredentialField};
use crate::tui::components::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<20}", label), style),
        Span::raw(value),
        Span::raw(if focused { "_" } else { "" }),
    ])
}

/// Render the login form
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.login_form;
    let panel = centered_rect(60, 12, area);

    let mut lines = vec![
        Line::raw(""),
        field_line(
            "Nom d'utilisateur",
            form.username.value().to_string(),
            form.focus == CredentialField::Username,
        ),
        field_line(
            "Mot de passe",
            form.password.masked(),
            form.focus == CredentialField::Password,
        ),
        Line::raw(""),
    ];

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Connexion…",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "  Entrée valider · Tab champ suivant · Esc annuler",
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines.push(Line::from(Span::styled(
        "  F2 créer un compte · F3 mot de passe oublié",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Connexion "));
    f.render_widget(Clear, panel);
    f.render_widget(widget, panel);
}
