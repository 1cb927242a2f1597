//! Summary command implementation
//!
//! Fetches the hit collection once and prints the client-family and
//! address summaries, either as colored text or as JSON.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use hit_dashboard::{
    config::Config,
    dashboard::DashboardState,
    hits::{AddressSummary, ClientFamilySummary, HitsFetcher},
};

use super::resolve_hits_url;

/// JSON shape of the summary printout
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    total_hits: usize,
    by_client_family: &'a [ClientFamilySummary],
    by_address: &'a [AddressSummary],
}

impl<'a> SummaryReport<'a> {
    fn from_state(state: &'a DashboardState) -> Self {
        Self {
            total_hits: state.total_hits(),
            by_client_family: state.by_client_family(),
            by_address: state.by_address(),
        }
    }
}

/// Execute the summary command
///
/// Unlike the dashboard there is no previous snapshot to fall back on, so
/// a failed fetch ends the command with an error.
pub async fn execute(url: Option<String>, json: bool, cfg: &Config) -> Result<()> {
    let hits_url = resolve_hits_url(url, cfg);
    let fetcher = HitsFetcher::new(hits_url.clone(), cfg.source.timeout())?;

    let hits = match fetcher.fetch().await {
        Ok(hits) => hits,
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Error fetching API hits");
            return Err(e.into());
        }
    };

    let mut state = DashboardState::new();
    state.apply(hits);
    info!(hits = state.total_hits(), "Summarized API hits");

    if json {
        let report = SummaryReport::from_state(&state);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&state, &hits_url);
    }

    Ok(())
}

fn print_text(state: &DashboardState, hits_url: &str) {
    println!("{} {}", "API hits from".bold(), hits_url);
    println!("  {}: {}", "Total".cyan(), state.total_hits());
    println!();

    println!("{}", "Hits by Browser:".cyan());
    for entry in state.by_client_family() {
        let (r, g, b) = entry.color.rgb();
        println!(
            "    {} {} {}",
            "■".truecolor(r, g, b),
            display_key(&entry.name),
            entry.value
        );
    }
    println!();

    println!("{}", "Hits by IP Address:".cyan());
    for entry in state.by_address() {
        println!("    {} {}", display_key(&entry.name), entry.count);
    }
}

fn display_key(key: &str) -> String {
    if key.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hit_dashboard::hits::HitRecord;
    use serde_json::json;

    fn hit(id: i64, user_agent: &str, ip: &str) -> HitRecord {
        HitRecord {
            user_agent: Some(user_agent.to_string()),
            ip_address: Some(ip.to_string()),
            ..HitRecord::new(id)
        }
    }

    #[test]
    fn test_json_report_shape() {
        let mut state = DashboardState::new();
        state.apply(vec![
            hit(1, "Mozilla/5.0 X", "10.0.0.1"),
            hit(2, "Mozilla/5.0 X", "10.0.0.1"),
            hit(3, "Chrome/99 Y", "10.0.0.2"),
        ]);

        let report = serde_json::to_value(SummaryReport::from_state(&state)).unwrap();

        assert_eq!(report["total_hits"], 3);
        assert_eq!(
            report["by_address"],
            json!([
                {"name": "10.0.0.1", "count": 2},
                {"name": "10.0.0.2", "count": 1}
            ])
        );

        let families = report["by_client_family"].as_array().unwrap();
        assert_eq!(families.len(), 2);
        assert_eq!(families[0]["name"], "Mozilla/5.0");
        assert_eq!(families[0]["value"], 2);
        assert_eq!(families[1]["name"], "Chrome/99");
        assert_eq!(families[1]["value"], 1);
        for entry in families {
            let color = entry["color"].as_str().unwrap();
            assert!(color.starts_with('#') && color.len() == 7);
        }
    }

    #[test]
    fn test_json_report_empty() {
        let state = DashboardState::new();
        let report = serde_json::to_value(SummaryReport::from_state(&state)).unwrap();
        assert_eq!(
            report,
            json!({"total_hits": 0, "by_client_family": [], "by_address": []})
        );
    }
}
