//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::TaskKind;
use crate::features::articles::{self, DashboardState};
use crate::features::auth;
use crate::features::notice::NoticeKind;
use crate::state::{AppState, Screen, TuiState};

/// Spinner frames for the header activity indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    match &app.tui.screen {
        Screen::Entry(auth_state) => {
            auth::render_entry(frame, area, auth_state, &app.tui.tasks);
        }
        Screen::Dashboard(dashboard) => {
            render_dashboard(frame, area, &app.tui, dashboard);
        }
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, tui: &TuiState, dashboard: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // search bar
            Constraint::Min(1),    // article list
            Constraint::Length(1), // notice line
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_header(frame, rows[0], tui, dashboard);
    render_search_bar(frame, rows[1], dashboard);
    articles::render_list(frame, rows[2], dashboard);
    render_notice_line(frame, rows[3], tui);
    render_key_hints(frame, rows[4], dashboard);
}

fn render_header(frame: &mut Frame, area: Rect, tui: &TuiState, dashboard: &DashboardState) {
    let mut spans = vec![
        Span::styled(
            "particles",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("@{}", dashboard.username),
            Style::default().fg(Color::Green),
        ),
    ];
    if tui.tasks.is_any_running() {
        let frame_idx = (tui.tick as usize) % SPINNER_FRAMES.len();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            SPINNER_FRAMES[frame_idx],
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            running_label(tui),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn running_label(tui: &TuiState) -> &'static str {
    if tui.tasks.refresh.is_running() {
        " loading"
    } else if tui.tasks.state(TaskKind::Delete).is_running() {
        " deleting"
    } else {
        " saving"
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, dashboard: &DashboardState) {
    let border_color = if dashboard.search.focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title("Search");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut shown = dashboard.search.term.clone();
    if dashboard.search.focused {
        shown.push('█');
    } else if shown.is_empty() {
        shown = "press / to search".to_string();
    }
    let style = if dashboard.search.term.is_empty() && !dashboard.search.focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(shown).style(style), inner);
}

fn render_notice_line(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let Some(notice) = &tui.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color),
        ))),
        area,
    );
}

fn render_key_hints(frame: &mut Frame, area: Rect, dashboard: &DashboardState) {
    let hints = if dashboard.search.focused {
        "Enter search  Esc clear"
    } else {
        "n new  e edit  Enter view  d delete  / search  r refresh  ^L logout  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
