// Registration form component

use crate::tui::app::{App, SignupField};
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

/// Render the signup form
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.signup_form;
    let panel = centered_rect(60, 13, area);

    let mut lines = vec![
        Line::raw(""),
        field_line(
            "Nom d'utilisateur",
            form.username.value().to_string(),
            form.focus == SignupField::Username,
        ),
        field_line(
            "Adresse e-mail",
            form.email.value().to_string(),
            form.focus == SignupField::Email,
        ),
        field_line(
            "Mot de passe",
            form.password.masked(),
            form.focus == SignupField::Password,
        ),
        Line::raw(""),
    ];

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Création du compte…",
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
        "  Entrée valider · Tab champ suivant · Esc retour",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Inscription "));
    f.render_widget(Clear, panel);
    f.render_widget(widget, panel);
}
