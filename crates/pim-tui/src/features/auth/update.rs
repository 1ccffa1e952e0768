//! Entry screen reducer.
//!
//! Handles keyboard input for the login/registration form. Validation
//! failures are reported locally; network calls become effects for the
//! runtime to spawn.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::AuthState;
use crate::common::Tasks;
use crate::effects::UiEffect;
use crate::features::notice::Notice;

/// Result of one key press on the entry screen.
#[derive(Debug, Default)]
pub struct AuthKeyOutcome {
    pub effects: Vec<UiEffect>,
    pub notice: Option<Notice>,
    pub quit: bool,
}

pub fn handle_key(auth: &mut AuthState, tasks: &Tasks, key: KeyEvent) -> AuthKeyOutcome {
    let mut outcome = AuthKeyOutcome::default();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            outcome.quit = true;
        }
        KeyCode::Char('c') if ctrl => {
            outcome.quit = true;
        }
        KeyCode::Char('r') if ctrl => {
            if tasks.register.is_running() {
                outcome.notice = Some(Notice::info("Registration in progress..."));
                return outcome;
            }
            match auth.validated() {
                Ok((username, password)) => {
                    outcome.effects.push(UiEffect::Register { username, password });
                }
                Err(message) => outcome.notice = Some(Notice::error(message)),
            }
        }
        KeyCode::Enter => {
            if tasks.login.is_running() {
                outcome.notice = Some(Notice::info("Signing in..."));
                return outcome;
            }
            match auth.validated() {
                Ok((username, password)) => {
                    outcome.effects.push(UiEffect::Login { username, password });
                }
                Err(message) => outcome.notice = Some(Notice::error(message)),
            }
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            auth.toggle_field();
        }
        KeyCode::Backspace => {
            auth.pop_char();
        }
        KeyCode::Char(c) if !ctrl => {
            auth.push_char(c);
        }
        _ => {}
    }

    outcome
}
