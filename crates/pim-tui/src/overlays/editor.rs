//! Create/edit modal.
//!
//! One state machine covers the whole edit session: a form step for title
//! and content, then a masked credential step. The credential step replaces
//! the old blocking password prompt; Esc there returns to the form with the
//! user's edits intact instead of discarding them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, overlay_area, render_container, render_field, render_hints};
use crate::effects::UiEffect;
use crate::state::{Screen, TuiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    Content,
}

/// Current step of the edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStep {
    /// Editing title and content.
    Form,
    /// Re-entering the password to authorize the mutation.
    Password { value: String },
}

/// State for the create/edit overlay.
///
/// `target` is the edit session: `None` means creating, `Some(id)` means
/// editing the record with that identity. It is consumed exactly once, when
/// the submit or cancel path closes the overlay.
#[derive(Debug)]
pub struct EditorState {
    pub target: Option<String>,
    pub title: String,
    pub content: String,
    pub field: EditorField,
    pub step: EditorStep,
    pub error: Option<String>,
}

impl EditorState {
    /// Opens the editor in creating mode with empty fields.
    pub fn create() -> Self {
        Self {
            target: None,
            title: String::new(),
            content: String::new(),
            field: EditorField::Title,
            step: EditorStep::Form,
            error: None,
        }
    }

    /// Opens the editor for an existing record, seeded from the rendered
    /// copy (not a fresh fetch).
    pub fn edit(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target: Some(id.into()),
            title: title.into(),
            content: content.into(),
            field: EditorField::Title,
            step: EditorStep::Form,
            error: None,
        }
    }

    pub fn is_creating(&self) -> bool {
        self.target.is_none()
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        // Clear the error on anything that isn't a submit attempt.
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match &mut self.step {
            EditorStep::Form => self.handle_form_key(tui, key),
            EditorStep::Password { .. } => self.handle_password_key(tui, key),
        }
    }

    fn handle_form_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('s') if ctrl => {
                if self.title.trim().is_empty() || self.content.trim().is_empty() {
                    self.error = Some("Please fill in both title and content.".to_string());
                    return OverlayUpdate::stay();
                }
                let busy = if self.is_creating() {
                    tui.tasks.create.is_running()
                } else {
                    tui.tasks.update.is_running()
                };
                if busy {
                    self.error = Some("Submission in progress...".to_string());
                    return OverlayUpdate::stay();
                }
                self.step = EditorStep::Password {
                    value: String::new(),
                };
                OverlayUpdate::stay()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    EditorField::Title => EditorField::Content,
                    EditorField::Content => EditorField::Title,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                match self.field {
                    // Enter on the title moves into the content field.
                    EditorField::Title => self.field = EditorField::Content,
                    EditorField::Content => self.content.push('\n'),
                }
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                match self.field {
                    EditorField::Title => self.title.pop(),
                    EditorField::Content => self.content.pop(),
                };
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                match self.field {
                    EditorField::Title => self.title.push(c),
                    EditorField::Content => self.content.push(c),
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn handle_password_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let EditorStep::Password { value } = &mut self.step else {
            return OverlayUpdate::stay();
        };
        match key.code {
            // Explicit cancel of the credential step: back to the form,
            // edits intact.
            KeyCode::Esc => {
                self.step = EditorStep::Form;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if value.is_empty() {
                    self.error = Some("Password is required to submit.".to_string());
                    return OverlayUpdate::stay();
                }
                let Screen::Dashboard(dashboard) = &tui.screen else {
                    return OverlayUpdate::close();
                };
                let password = std::mem::take(value);
                let effect = match &self.target {
                    None => UiEffect::CreateArticle {
                        username: dashboard.username.clone(),
                        password,
                        title: self.title.trim().to_string(),
                        content: self.content.trim().to_string(),
                    },
                    Some(id) => UiEffect::UpdateArticle {
                        id: id.clone(),
                        username: dashboard.username.clone(),
                        password,
                        title: self.title.trim().to_string(),
                        content: self.content.trim().to_string(),
                    },
                };
                OverlayUpdate::close().with_effects(vec![effect])
            }
            KeyCode::Backspace => {
                value.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                value.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.is_creating() {
            "Create New Article"
        } else {
            "Edit Article"
        };
        let popup = overlay_area(area, 60, 14);
        let body = render_container(frame, popup, title, Color::Yellow);

        match &self.step {
            EditorStep::Form => self.render_form(frame, body),
            EditorStep::Password { value } => self.render_password(frame, body, value),
        }
    }

    fn render_form(&self, frame: &mut Frame, body: Rect) {
        let title_area = Rect::new(body.x, body.y, body.width, 1);
        render_field(
            frame,
            title_area,
            "Title  ",
            &self.title,
            self.field == EditorField::Title,
            false,
        );

        let content_label = Rect::new(body.x, body.y + 2, body.width, 1);
        let label_style = if self.field == EditorField::Content {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("Content", label_style))),
            content_label,
        );

        let content_height = body.height.saturating_sub(5);
        let content_area = Rect::new(body.x, body.y + 3, body.width, content_height);
        let mut content = self.content.clone();
        if self.field == EditorField::Content {
            content.push('█');
        }
        frame.render_widget(
            Paragraph::new(content).wrap(Wrap { trim: false }),
            content_area,
        );

        self.render_error_line(frame, body);
        render_hints(
            frame,
            body,
            &[
                InputHint::new("Ctrl+S", "submit"),
                InputHint::new("Tab", "switch field"),
                InputHint::new("Esc", "cancel"),
            ],
            Color::Yellow,
        );
    }

    fn render_password(&self, frame: &mut Frame, body: Rect, value: &str) {
        let prompt_area = Rect::new(body.x, body.y + 1, body.width, 1);
        let verb = if self.is_creating() { "create" } else { "edit" };
        frame.render_widget(
            Paragraph::new(format!("Enter your password to {verb} this article:")),
            prompt_area,
        );

        let field_area = Rect::new(body.x, body.y + 3, body.width, 1);
        render_field(frame, field_area, "Password", value, true, true);

        self.render_error_line(frame, body);
        render_hints(
            frame,
            body,
            &[
                InputHint::new("Enter", "confirm"),
                InputHint::new("Esc", "back to form"),
            ],
            Color::Yellow,
        );
    }

    fn render_error_line(&self, frame: &mut Frame, body: Rect) {
        if let Some(error) = &self.error {
            let error_y = body.y + body.height.saturating_sub(2);
            let error_area = Rect::new(body.x, error_y, body.width, 1);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                ))),
                error_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TuiState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn dashboard_tui() -> TuiState {
        TuiState::for_dashboard_tests("alice")
    }

    #[test]
    fn submit_with_empty_fields_keeps_form_open() {
        let tui = dashboard_tui();
        let mut editor = EditorState::create();

        let update = editor.handle_key(&tui, ctrl('s'));
        assert!(matches!(update.transition, super::super::OverlayTransition::Stay));
        assert!(editor.error.is_some());
        assert_eq!(editor.step, EditorStep::Form);
    }

    #[test]
    fn valid_form_advances_to_password_step() {
        let tui = dashboard_tui();
        let mut editor = EditorState::edit("3", "T", "C");

        editor.handle_key(&tui, ctrl('s'));
        assert!(matches!(editor.step, EditorStep::Password { .. }));
    }

    #[test]
    fn password_esc_returns_to_form_with_edits_intact() {
        let tui = dashboard_tui();
        let mut editor = EditorState::edit("3", "Title", "Content");
        editor.handle_key(&tui, ctrl('s'));

        let update = editor.handle_key(&tui, key(KeyCode::Esc));
        assert!(matches!(update.transition, super::super::OverlayTransition::Stay));
        assert_eq!(editor.step, EditorStep::Form);
        assert_eq!(editor.title, "Title");
        assert_eq!(editor.content, "Content");
    }

    #[test]
    fn empty_password_does_not_submit() {
        let tui = dashboard_tui();
        let mut editor = EditorState::create();
        editor.title = "T".to_string();
        editor.content = "C".to_string();
        editor.handle_key(&tui, ctrl('s'));

        let update = editor.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.effects.is_empty());
        assert!(matches!(update.transition, super::super::OverlayTransition::Stay));
        assert!(editor.error.is_some());
    }

    #[test]
    fn create_submission_emits_create_effect_and_closes() {
        let tui = dashboard_tui();
        let mut editor = EditorState::create();
        editor.title = " T ".to_string();
        editor.content = "C".to_string();
        editor.handle_key(&tui, ctrl('s'));
        for c in "pw".chars() {
            editor.handle_key(&tui, key(KeyCode::Char(c)));
        }

        let update = editor.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, super::super::OverlayTransition::Close));
        assert_eq!(
            update.effects,
            vec![UiEffect::CreateArticle {
                username: "alice".to_string(),
                password: "pw".to_string(),
                title: "T".to_string(),
                content: "C".to_string(),
            }]
        );
    }

    #[test]
    fn edit_submission_targets_the_seeded_identity() {
        let tui = dashboard_tui();
        let mut editor = EditorState::edit("42", "T", "C");
        editor.handle_key(&tui, ctrl('s'));
        editor.handle_key(&tui, key(KeyCode::Char('p')));

        let update = editor.handle_key(&tui, key(KeyCode::Enter));
        assert_eq!(
            update.effects,
            vec![UiEffect::UpdateArticle {
                id: "42".to_string(),
                username: "alice".to_string(),
                password: "p".to_string(),
                title: "T".to_string(),
                content: "C".to_string(),
            }]
        );
    }

    #[test]
    fn enter_in_content_inserts_newline() {
        let tui = dashboard_tui();
        let mut editor = EditorState::create();
        editor.field = EditorField::Content;
        editor.handle_key(&tui, key(KeyCode::Char('a')));
        editor.handle_key(&tui, key(KeyCode::Enter));
        editor.handle_key(&tui, key(KeyCode::Char('b')));

        assert_eq!(editor.content, "a\nb");
    }
}
