//! Bucketing, filtering, and statistics over catalogs.
//!
//! Every operation here derives a new [`datforge_core::Catalog`] from its
//! input; source catalogs are never mutated, so callers can run independent
//! pipelines over the same parsed data.

pub mod bucket;
pub mod filter;
pub mod stats;

pub use bucket::{bucket_by_best_hash, bucket_by_machine, BucketOptions, HashBucket};
pub use filter::{wildcard_match, EntryFilter};
pub use stats::CatalogStats;
