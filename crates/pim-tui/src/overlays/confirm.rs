//! Delete confirmation dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, overlay_area, render_container, render_hints};
use crate::common::text::truncate_with_ellipsis;
use crate::effects::UiEffect;

#[derive(Debug)]
pub struct ConfirmState {
    /// Identity of the article to delete once confirmed.
    pub target: String,
    /// Title shown in the prompt.
    pub title: String,
}

impl ConfirmState {
    pub fn new(target: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            title: title.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => OverlayUpdate::close()
                .with_effects(vec![UiEffect::DeleteArticle {
                    id: self.target.clone(),
                }]),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = overlay_area(area, 50, 7);
        let body = render_container(frame, popup, "Delete Article", Color::Red);

        let shown = truncate_with_ellipsis(&self.title, body.width.saturating_sub(10) as usize);
        let prompt = Line::from(vec![
            Span::raw("Delete \""),
            Span::styled(shown, Style::default().fg(Color::Yellow)),
            Span::raw("\"?"),
        ]);
        let prompt_area = Rect::new(body.x, body.y + 1, body.width, 1);
        frame.render_widget(Paragraph::new(prompt), prompt_area);

        render_hints(
            frame,
            body,
            &[InputHint::new("y", "delete"), InputHint::new("n", "cancel")],
            Color::Red,
        );
    }
}
