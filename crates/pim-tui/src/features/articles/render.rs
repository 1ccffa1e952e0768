//! Pure rendering of the article list.
//!
//! Functions here take state by immutable reference and produce ratatui
//! lines; committing them to the terminal is the runtime's job. User text is
//! sanitized before embedding so note content cannot corrupt the terminal.

use pim_core::api::ArticleRecord;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::DashboardState;
use crate::common::{sanitize_for_display, truncate_with_ellipsis};

/// Lines per article row: title, content preview, id meta.
const ROW_LINES: usize = 3;

/// Maps the rendered article set to display lines.
///
/// Pure and deterministic. An empty set yields an explicit empty-state
/// indicator rather than a blank region.
pub fn article_lines(
    articles: &[ArticleRecord],
    selected: usize,
    width: usize,
) -> Vec<Line<'static>> {
    if articles.is_empty() {
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                "No articles found.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Press n to create one.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
    }

    let mut lines = Vec::with_capacity(articles.len() * ROW_LINES);
    for (index, article) in articles.iter().enumerate() {
        let is_selected = index == selected;
        let marker = if is_selected { "▌ " } else { "  " };
        let title_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let title = sanitize_for_display(&article.title);
        let title = truncate_with_ellipsis(title.lines().next().unwrap_or(""), width.saturating_sub(2));
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(title, title_style),
        ]));

        let content = sanitize_for_display(&article.content);
        let preview = truncate_with_ellipsis(
            content.lines().next().unwrap_or(""),
            width.saturating_sub(4),
        );
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(preview, Style::default().fg(Color::Gray)),
        ]));

        lines.push(Line::from(Span::styled(
            format!("    id {}", article.id),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Draws the article list into `area`, keeping the selection visible.
pub fn render_list(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = article_lines(&state.articles, state.selected, area.width as usize);

    // Scroll so the selected row's lines are within the viewport.
    let selected_top = state.selected * ROW_LINES;
    let height = area.height as usize;
    let scroll = if state.articles.is_empty() || height == 0 {
        0
    } else if selected_top + ROW_LINES > height {
        (selected_top + ROW_LINES - height).min(lines.len().saturating_sub(height))
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
