//! Application state composition.
//!
//! Top-level state hierarchy:
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── screen: Screen         (Entry form or Dashboard)
//! │   ├── task_seq: TaskSeq      (async task id generator)
//! │   ├── tasks: Tasks           (task lifecycle state)
//! │   ├── notice: Option<Notice> (status line message)
//! │   └── tick: u64              (spinner frame counter)
//! └── overlay: Option<Overlay>   (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so an overlay
//! handler can take `&mut self` and `&TuiState` at the same time without a
//! borrow conflict.

use crate::common::{TaskSeq, Tasks};
use crate::features::articles::DashboardState;
use crate::features::auth::AuthState;
use crate::features::notice::Notice;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Starts at the entry form (no persisted session).
    pub fn entry() -> Self {
        Self {
            tui: TuiState::new(Screen::Entry(AuthState::default())),
            overlay: None,
        }
    }

    /// Starts on the dashboard with a restored session identity.
    pub fn dashboard(username: impl Into<String>) -> Self {
        Self {
            tui: TuiState::new(Screen::Dashboard(DashboardState::new(username))),
            overlay: None,
        }
    }
}

/// Which top-level screen is shown.
#[derive(Debug)]
pub enum Screen {
    Entry(AuthState),
    Dashboard(DashboardState),
}

/// Non-overlay UI state.
#[derive(Debug)]
pub struct TuiState {
    pub screen: Screen,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub notice: Option<Notice>,
    /// Tick counter driving the spinner animation.
    pub tick: u64,
}

impl TuiState {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            notice: None,
            tick: 0,
        }
    }

    /// The dashboard state, when that screen is active.
    pub fn dashboard(&self) -> Option<&DashboardState> {
        match &self.screen {
            Screen::Dashboard(d) => Some(d),
            Screen::Entry(_) => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardState> {
        match &mut self.screen {
            Screen::Dashboard(d) => Some(d),
            Screen::Entry(_) => None,
        }
    }

    #[cfg(test)]
    pub fn for_dashboard_tests(username: &str) -> Self {
        Self::new(Screen::Dashboard(DashboardState::new(username)))
    }
}
