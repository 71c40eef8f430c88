// Post detail component
//
// Full content view for one post: title, publication metadata, and the
// sanitized content rendered as wrapped text. Paragraph boundaries from the
// HTML survive as blank lines.

use crate::html;
use crate::tui::app::{App, Detail};
use crate::tui::components::formatters::format_date;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Split sanitized HTML content into displayable paragraphs
pub fn content_paragraphs(html_content: &str) -> Vec<String> {
    html::sanitize(html_content)
        .split("</p>")
        .map(html::strip_tags)
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Render the detail view
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    match &app.detail {
        Detail::Empty => {}
        Detail::Loading(slug) => {
            let paragraph = Paragraph::new(format!("Chargement de « {} »…", slug))
                .style(Style::default().add_modifier(Modifier::DIM))
                .centered();
            f.render_widget(paragraph, area);
        }
        Detail::Loaded(post) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!(
                        "Publié le {} — {}",
                        format_date(post.publish_date.as_ref()),
                        post.author_name.as_deref().unwrap_or("auteur inconnu"),
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                )),
                Line::raw(""),
            ];

            if let Some(image) = &post.featured_image {
                lines.push(Line::from(Span::styled(
                    format!("[image: {}]", image.alt_text.as_deref().unwrap_or("illustration")),
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::raw(""));
            }

            for paragraph in content_paragraphs(&post.html_content) {
                lines.push(Line::raw(paragraph));
                lines.push(Line::raw(""));
            }

            if let Some(permalink) = &post.permalink {
                lines.push(Line::from(Span::styled(
                    format!("Lien: {}  [y] copier", permalink),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }

            let body = Paragraph::new(Text::from(lines))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", post.title)),
                )
                .wrap(Wrap { trim: false })
                .scroll((app.detail_scroll, 0));
            f.render_widget(body, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_paragraphs_preserve_boundaries() {
        let html = "<p>Premier paragraphe.</p><p>Deuxième paragraphe.</p>";
        assert_eq!(
            content_paragraphs(html),
            vec!["Premier paragraphe.", "Deuxième paragraphe."]
        );
    }

    #[test]
    fn test_content_paragraphs_drop_script_content() {
        let html = "<p>visible</p><script>alert('x')</script>";
        assert_eq!(content_paragraphs(html), vec!["visible"]);
    }
}
