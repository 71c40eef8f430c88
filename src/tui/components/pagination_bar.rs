// Pagination controls
//
// First / previous / page indicator / next / last, with each control dimmed
// when its intent would be a no-op, exactly following the listing
// controller's gating rules.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn control(label: &str, enabled: bool) -> Span<'_> {
    if enabled {
        Span::raw(label.to_string())
    } else {
        Span::styled(label.to_string(), Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the pagination bar under the listing
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.selected_category.is_none() {
        return;
    }

    let back = app.listing.can_go_back();
    let next = app.listing.can_go_next();
    let last = app.listing.can_go_last();

    let mut spans = vec![
        Span::raw(" "),
        control("⏮ Première [g]", back),
        Span::raw("  "),
        control("◀ Précédent [←]", back),
        Span::raw("   "),
        Span::styled(
            app.listing.page_indicator(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        control("Suivant [→] ▶", next),
        Span::raw("  "),
        control("Dernière [G] ⏭", last),
    ];

    if app.listing_is_loading() {
        spans.push(Span::styled(
            "   chargement…",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(bar, area);
}
