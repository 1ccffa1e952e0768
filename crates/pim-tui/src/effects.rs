//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Verify credentials against the backend.
    Login { username: String, password: String },

    /// Create an account. No session side effects.
    Register { username: String, password: String },

    /// Fetch the article list for `username`, replacing the rendered set on
    /// completion. `term` selects search retrieval; `None` lists everything.
    Refresh {
        username: String,
        term: Option<String>,
    },

    /// Create an article (password re-confirmed server-side).
    CreateArticle {
        username: String,
        password: String,
        title: String,
        content: String,
    },

    /// Update an article by identity (password re-confirmed server-side).
    UpdateArticle {
        id: String,
        username: String,
        password: String,
        title: String,
        content: String,
    },

    /// Delete an article by identity.
    DeleteArticle { id: String },

    /// Persist the session identity to disk after a successful login.
    PersistSession { username: String },

    /// Remove the persisted session (logout).
    ClearSession,
}
