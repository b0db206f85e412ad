//! Statdash TUI: terminal dashboard for yearly statistics.
//!
//! Panels:
//! 1. Chart: stacked composition chart with highlight markers, or trend lines
//! 2. Table: filtered rows in millions
//! 3. Summary: mean publishers, studies and memorial attendance
//! 4. Help: keyboard shortcuts

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, Panel};
pub use input::handle_key;
