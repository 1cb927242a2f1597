//! Dashboard view for API hit telemetry
//!
//! This module holds the per-view state (raw hits and derived summaries)
//! and the terminal rendering of the hits table and both charts.

pub mod state;
pub mod ui;

// Re-export commonly used types
pub use state::DashboardState;
pub use ui::{DashboardApp, KeyAction};
