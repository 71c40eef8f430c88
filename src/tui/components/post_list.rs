// Post listing component
//
// The grid of excerpts for the active category. Each entry is two lines:
// title, then the 200-character excerpt with markup stripped for the
// terminal. Empty states mirror the site's wording.

use crate::html;
use crate::listing::Phase;
use crate::tui::app::App;
use crate::tui::components::formatters::{format_date, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the listing for the active category
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.selected_category.is_none() {
        return render_notice(f, area, "Veuillez sélectionner une catégorie. [Tab]");
    }

    if app.listing.posts.is_empty() {
        let notice = match &app.listing.phase {
            Phase::Loading => "Chargement des articles…",
            Phase::Error(_) => "", // The error banner carries the message
            _ => "Aucun article trouvé pour cette catégorie.",
        };
        return render_notice(f, area, notice);
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .listing
        .posts
        .iter()
        .map(|post| {
            let meta = format!(
                "{} — {}",
                format_date(post.publish_date.as_ref()),
                post.author_name.as_deref().unwrap_or("auteur inconnu")
            );
            let excerpt = html::strip_tags(&html::excerpt(&post.html_content));
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        truncate_to_width(&post.title, width.saturating_sub(meta.len() + 3)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", meta),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ]),
                Line::from(Span::styled(
                    truncate_to_width(&excerpt, width),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_post));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_notice(f: &mut Frame, area: Rect, notice: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        notice,
        Style::default().add_modifier(Modifier::DIM),
    )))
    .centered();
    f.render_widget(paragraph, area);
}
