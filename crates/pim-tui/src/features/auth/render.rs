//! Entry screen rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{AuthField, AuthState};
use crate::common::Tasks;

pub fn render_entry(frame: &mut Frame, area: Rect, auth: &AuthState, tasks: &Tasks) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 9.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" pim · sign in ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let field_line = |label: &str, value: &str, active: bool, mask: bool| {
        let shown: String = if mask {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{label:<10}"), label_style), Span::raw(shown)];
        if active {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };

    let busy = tasks.login.is_running() || tasks.register.is_running();
    let status = if busy { "Contacting server..." } else { "" };

    let lines = vec![
        Line::from(""),
        field_line(
            "Username",
            &auth.username,
            auth.field == AuthField::Username,
            false,
        ),
        field_line(
            "Password",
            &auth.password,
            auth.field == AuthField::Password,
            true,
        ),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" sign in • ", Style::default().fg(Color::DarkGray)),
            Span::styled("Ctrl+R", Style::default().fg(Color::Cyan)),
            Span::styled(" register • ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::styled(" quit", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
