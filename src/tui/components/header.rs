// Header component
//
// Top of every view: site title with the account state on the right, and
// the category menu underneath with the active category highlighted.

use crate::tui::app::App;
use crate::tui::components::formatters::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the site title and the category menu
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2)])
        .split(area);

    render_title(f, rows[0], app);
    render_menu(f, rows[1], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let title = app
        .catalog
        .as_ref()
        .map(|catalog| catalog.site.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("Gazette");

    // Caption of the active category (falls back to the site description
    // during catalog resolution), markup stripped for the terminal
    let caption = app
        .selected_category
        .zip(app.catalog.as_ref())
        .and_then(|(idx, catalog)| catalog.categories.get(idx))
        .and_then(|category| category.caption.as_deref())
        .map(crate::html::strip_tags)
        .filter(|caption| !caption.is_empty());

    let account = if app.session.is_logged_in {
        let name = app
            .session
            .current_user
            .as_ref()
            .map(|user| user.name.as_str())
            .unwrap_or("connecté");
        format!("👤 {} · [a] déconnexion", name)
    } else {
        "[a] connexion".to_string()
    };

    let caption_text = caption
        .map(|caption| {
            format!(
                " — {}",
                truncate_to_width(&caption, (area.width as usize).saturating_sub(40))
            )
        })
        .unwrap_or_default();

    let padding = (area.width as usize).saturating_sub(
        title.chars().count() + caption_text.chars().count() + account.chars().count() + 2,
    );
    let line = Line::from(vec![
        Span::styled(format!(" {}", title), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(caption_text, Style::default().add_modifier(Modifier::DIM)),
        Span::raw(" ".repeat(padding)),
        Span::raw(account),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_menu(f: &mut Frame, area: Rect, app: &App) {
    let line = match (&app.catalog, &app.catalog_error) {
        (Some(catalog), _) if !catalog.categories.is_empty() => {
            let mut spans = Vec::new();
            for (idx, category) in catalog.categories.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(" │ "));
                }
                let label = format!(" {} ", category.name);
                if Some(idx) == app.selected_category {
                    spans.push(Span::styled(
                        label,
                        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw(label));
                }
            }
            Line::from(spans)
        }
        (Some(_), _) => Line::from(Span::styled(
            " Aucune catégorie disponible",
            Style::default().add_modifier(Modifier::DIM),
        )),
        (None, Some(error)) => Line::from(Span::styled(
            format!(" Catalogue indisponible: {}", truncate_to_width(error, area.width as usize)),
            Style::default().fg(ratatui::style::Color::Red),
        )),
        (None, None) => Line::from(Span::styled(
            " Chargement des catégories…",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let menu = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(menu, area);
}
