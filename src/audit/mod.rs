//! Directory audit engine
//!
//! ```text
//! Traversal (calling thread) ──▶ worker pool ──▶ probe + classify ──▶ Aggregator
//!                                                                      │
//!                                              join ──▶ RunReport ◀────┘
//! ```
//!
//! The [`Aggregator`] is the only shared mutable state; workers reach it
//! exclusively through [`Aggregator::contribute`].

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod probe;
pub mod traversal;
pub mod types;

pub use aggregate::{Aggregate, Aggregator};
pub use classify::{category_for_extension, classify, extension_of};
pub use error::{AnalyzeError, ProbeError};
pub use probe::probe;
pub use traversal::{Analyzer, DEFAULT_THRESHOLD_BYTES, analyze, resolve_threshold, validate_root};
pub use types::{Category, FileRecord, RunReport, RunStats, TypeBucket, UNUSUAL_PERMISSION_MASK};
