//! Hit aggregation into chart summaries
//!
//! This module groups a raw hit collection by a derived key (client family
//! or source address) and tallies the hits per key. Groups are emitted in
//! the order their key first occurs in the input, so legend and axis
//! ordering is stable for a given collection.

use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

use crate::hits::color::HexColor;
use crate::hits::record::HitRecord;

/// Grouping strategy for hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Leading token of the user agent
    ClientFamily,
    /// Source IP address, verbatim
    Address,
}

/// Hits sharing one client-family key, with its display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientFamilySummary {
    pub name: String,
    pub value: u64,
    pub color: HexColor,
}

/// Hits sharing one source address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressSummary {
    pub name: String,
    pub count: u64,
}

/// Derive the client-family key from a raw user agent string
///
/// This is the leading whitespace-delimited token, e.g. `"Mozilla/5.0"`
/// for `"Mozilla/5.0 (X11; Linux x86_64) ..."`. It is an approximation of
/// browser detection, not a user agent parser: different browsers sharing
/// a `Mozilla/5.0` prefix collapse into one family. A string starting with
/// whitespace yields the empty key.
pub fn client_family_key(user_agent: &str) -> &str {
    user_agent
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default()
}

/// Get grouping key based on strategy
pub fn group_key(hit: &HitRecord, group_by: GroupBy) -> &str {
    match group_by {
        GroupBy::ClientFamily => hit.client_family(),
        GroupBy::Address => hit.address(),
    }
}

/// Count hits per grouping key, in first-occurrence order
pub fn count_by(hits: &[HitRecord], group_by: GroupBy) -> Vec<(String, u64)> {
    let mut tally = OrderedTally::default();
    for hit in hits {
        tally.add(group_key(hit, group_by));
    }
    tally.into_counts()
}

/// Summarize hits by client family, coloring entries with the thread RNG
pub fn client_family_summary(hits: &[HitRecord]) -> Vec<ClientFamilySummary> {
    client_family_summary_with(hits, &mut rand::thread_rng())
}

/// Summarize hits by client family, drawing colors from `rng`
///
/// Every entry gets a freshly drawn color on each call.
pub fn client_family_summary_with<R: Rng + ?Sized>(
    hits: &[HitRecord],
    rng: &mut R,
) -> Vec<ClientFamilySummary> {
    count_by(hits, GroupBy::ClientFamily)
        .into_iter()
        .map(|(name, value)| ClientFamilySummary {
            name,
            value,
            color: HexColor::random(rng),
        })
        .collect()
}

/// Summarize hits by source address
pub fn address_summary(hits: &[HitRecord]) -> Vec<AddressSummary> {
    count_by(hits, GroupBy::Address)
        .into_iter()
        .map(|(name, count)| AddressSummary { name, count })
        .collect()
}

/// Counter keyed by string that remembers first-insertion order
#[derive(Default)]
struct OrderedTally<'a> {
    slots: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, u64)>,
}

impl<'a> OrderedTally<'a> {
    fn add(&mut self, key: &'a str) {
        match self.slots.get(key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(key, self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    fn into_counts(self) -> Vec<(String, u64)> {
        self.counts
            .into_iter()
            .map(|(key, count)| (key.to_string(), count))
            .collect()
    }
}
