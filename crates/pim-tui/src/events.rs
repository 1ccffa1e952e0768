//! UI event types.
//!
//! Events are the reducer's only input. The runtime collects them from the
//! terminal, the tick timer, and the async inbox, then feeds them through
//! `update` one at a time.

use crossterm::event::Event as CrosstermEvent;
use pim_core::api::{ApiResult, ArticleRecord};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// The mutating operation a completed task performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    /// Past-tense verb for outcome notices.
    pub fn past_tense(self) -> &'static str {
        match self {
            MutationKind::Create => "created",
            MutationKind::Update => "updated",
            MutationKind::Delete => "deleted",
        }
    }
}

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, polling cadence).
    Tick,

    /// Terminal input event (key, resize).
    Terminal(CrosstermEvent),

    /// An async task was spawned; the reducer records it as active.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// An async task finished. The inner event is only applied when the
    /// task is still the active one for its kind; stale completions are
    /// dropped.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Login call finished.
    LoginResult {
        username: String,
        result: ApiResult<()>,
    },

    /// Registration call finished.
    RegisterResult { result: ApiResult<()> },

    /// List or search fetch finished.
    ArticlesLoaded {
        result: ApiResult<Vec<ArticleRecord>>,
    },

    /// Create/update/delete call finished.
    MutationFinished {
        kind: MutationKind,
        result: ApiResult<()>,
    },
}
