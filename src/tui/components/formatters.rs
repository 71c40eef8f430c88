// Display formatting helpers shared by the panels

use chrono::NaiveDateTime;
use unicode_width::UnicodeWidthChar;

/// Truncate a string to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut. Width-aware so emojis and CJK don't
/// overflow the cell.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}

/// Publication date as shown in listings and the detail view
pub fn format_date(date: Option<&NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "date inconnue".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_to_width("bonjour", 20), "bonjour");
    }

    #[test]
    fn test_long_text_gets_ellipsis_within_budget() {
        let out = truncate_to_width("un très long titre d'article", 10);
        assert!(out.ends_with('…'));
        let width: usize = out.chars().map(|c| c.width().unwrap_or(0)).sum();
        assert!(width <= 10);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let out = truncate_to_width("日本語のタイトル", 7);
        let width: usize = out.chars().map(|c| c.width().unwrap_or(0)).sum();
        assert!(width <= 7);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(format_date(Some(&date)), "01/03/2024");
        assert_eq!(format_date(None), "date inconnue");
    }
}
