//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - dashboard: Interactive terminal dashboard
//! - summary: One-shot summary printout
//! - config: Configuration display and validation

pub mod config;
pub mod dashboard;
pub mod summary;

use hit_dashboard::config::Config;

/// Build hits endpoint URL from config or override
pub fn resolve_hits_url(url_override: Option<String>, cfg: &Config) -> String {
    url_override.unwrap_or_else(|| cfg.source.hits_url())
}
