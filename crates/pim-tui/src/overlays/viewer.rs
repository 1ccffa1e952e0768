//! Read-only article view with line scrolling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, overlay_area, render_container, render_hints};
use crate::common::text::sanitize_for_display;

#[derive(Debug)]
pub struct ViewerState {
    pub title: String,
    pub content: String,
    scroll: u16,
}

impl ViewerState {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            scroll: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                OverlayUpdate::stay()
            }
            KeyCode::Char('d') if ctrl => {
                self.scroll = self.scroll.saturating_add(10);
                OverlayUpdate::stay()
            }
            KeyCode::Char('u') if ctrl => {
                self.scroll = self.scroll.saturating_sub(10);
                OverlayUpdate::stay()
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll = 0;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = overlay_area(area, 70, 18);
        let body = render_container(frame, popup, &self.title, Color::Cyan);

        let text_height = body.height.saturating_sub(2);
        let text_area = Rect::new(body.x, body.y, body.width, text_height);
        frame.render_widget(
            Paragraph::new(sanitize_for_display(&self.content).into_owned())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            text_area,
        );

        render_hints(
            frame,
            body,
            &[
                InputHint::new("j/k", "scroll"),
                InputHint::new("Esc", "close"),
            ],
            Color::Cyan,
        );
    }
}
