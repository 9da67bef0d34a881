//! # mailsentry-intel
//!
//! The threat-intelligence store (C5) and feed importer (C11): a
//! SQLite-backed indicator set, a bounded LRU cache in front of it, and
//! importers for the URLhaus and OpenPhish feeds.
//!
//! Concurrency model (§5): the store serialises all operations behind a
//! single exclusive lock. Lookups are sub-millisecond once the cache is
//! warm, so this is a deliberate, documented simplification rather than
//! a bottleneck in practice.

mod cache;
mod error;
mod feeds;
mod models;
mod normalize;
mod store;

pub use cache::{IndicatorHit, ReputationCache, DEFAULT_CAPACITY};
pub use error::{Result, StoreError};
pub use feeds::{download_feed, import_openphish_lines, import_urlhaus_csv, update_from_download, FeedSource, ImportStats};
pub use models::{Indicator, IndicatorKind, TIReputation};
pub use normalize::registrable_domain;
pub use store::ThreatIntelStore;
