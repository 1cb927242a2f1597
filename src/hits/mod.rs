//! API hit records and the summaries derived from them
//!
//! This module provides the hit data model, the HTTP fetcher for the
//! tracking endpoint, and the aggregation that turns a raw hit collection
//! into chart-ready summaries.

pub mod aggregate;
pub mod color;
pub mod fetcher;
pub mod record;

// Re-export commonly used types
pub use aggregate::{
    address_summary, client_family_summary, client_family_summary_with, AddressSummary,
    ClientFamilySummary, GroupBy,
};
pub use color::HexColor;
pub use fetcher::{HitSource, HitsFetcher};
pub use record::{HitId, HitRecord, RequestTime};
