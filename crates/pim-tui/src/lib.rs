//! Full-screen TUI for the particles note service.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use pim_core::api::ApiClient;
use pim_core::session::Session;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive TUI.
///
/// A persisted session skips the entry form and lands on the dashboard;
/// an unreadable session file falls back to the entry form.
///
/// Must be called from within a tokio runtime context.
pub fn run(api: ApiClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("pim requires a terminal.");
    }

    let session = match Session::load() {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!("ignoring unreadable session file: {error:#}");
            None
        }
    };

    let state = match session {
        Some(session) => AppState::dashboard(session.username),
        None => AppState::entry(),
    };

    let mut runtime = TuiRuntime::new(api, state)?;
    runtime.run()
}
