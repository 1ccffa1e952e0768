//! Dashboard article list: state and rendering.

pub mod render;
pub mod state;

pub use render::{article_lines, render_list};
pub use state::{DashboardState, SearchState};
