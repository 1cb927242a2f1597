//! View state for one dashboard instance
//!
//! Holds the latest raw hit collection together with the two summaries
//! derived from it. The three are only ever replaced together.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::hits::aggregate::{
    address_summary, client_family_summary_with, AddressSummary, ClientFamilySummary,
};
use crate::hits::fetcher::HitSource;
use crate::hits::record::HitRecord;

/// Raw hits plus derived summaries, owned by a single view
#[derive(Debug, Default)]
pub struct DashboardState {
    hits: Vec<HitRecord>,
    by_client_family: Vec<ClientFamilySummary>,
    by_address: Vec<AddressSummary>,
    last_update: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> &[HitRecord] {
        &self.hits
    }

    pub fn by_client_family(&self) -> &[ClientFamilySummary] {
        &self.by_client_family
    }

    pub fn by_address(&self) -> &[AddressSummary] {
        &self.by_address
    }

    /// Time of the last successful fetch, `None` before the first one
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn total_hits(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Replace the raw collection and recompute both summaries from it
    pub fn apply(&mut self, hits: Vec<HitRecord>) {
        self.apply_with(hits, &mut rand::thread_rng());
    }

    /// Same as [`apply`](Self::apply), drawing chart colors from `rng`
    pub fn apply_with<R: Rng + ?Sized>(&mut self, hits: Vec<HitRecord>, rng: &mut R) {
        // Both summaries come from the same snapshot before anything is swapped in
        let by_client_family = client_family_summary_with(&hits, rng);
        let by_address = address_summary(&hits);

        self.hits = hits;
        self.by_client_family = by_client_family;
        self.by_address = by_address;
        self.last_update = Some(Utc::now());
    }

    /// Fetch once from `source` and apply the result
    ///
    /// A failed fetch is logged and leaves the current data in place.
    /// Returns `true` when new data was applied.
    pub async fn refresh<S: HitSource + ?Sized>(&mut self, source: &S) -> bool {
        match source.fetch_hits().await {
            Ok(hits) => {
                self.apply(hits);
                info!(
                    hits = self.hits.len(),
                    client_families = self.by_client_family.len(),
                    addresses = self.by_address.len(),
                    "Dashboard data refreshed"
                );
                true
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Error fetching API hits");
                false
            }
        }
    }
}
