//! Entry screen: login and registration.

pub mod render;
pub mod state;
pub mod update;

pub use render::render_entry;
pub use state::{AuthField, AuthState};
pub use update::{AuthKeyOutcome, handle_key};
