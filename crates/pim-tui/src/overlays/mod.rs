//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.
//!
//! - `editor.rs`: create/edit modal, including the credential step
//! - `viewer.rs`: read-only article view
//! - `confirm.rs`: delete confirmation
//! - `render_utils.rs`: shared rendering utilities for overlays

pub mod confirm;
pub mod editor;
pub mod render_utils;
pub mod viewer;

pub use confirm::ConfirmState;
use crossterm::event::KeyEvent;
pub use editor::{EditorState, EditorStep};
use ratatui::Frame;
use ratatui::layout::Rect;
pub use viewer::ViewerState;

use crate::effects::UiEffect;
use crate::features::notice::Notice;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
    pub notice: Option<Notice>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
            notice: None,
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Editor(EditorState),
    Viewer(ViewerState),
    Confirm(ConfirmState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Editor(e) => e.render(frame, area),
            Overlay::Viewer(v) => v.render(frame, area),
            Overlay::Confirm(c) => c.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Editor(e) => e.handle_key(tui, key),
            Overlay::Viewer(v) => v.handle_key(key),
            Overlay::Confirm(c) => c.handle_key(key),
        }
    }
}
