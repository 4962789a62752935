use super::error::ProbeError;
use super::types::{Category, FileRecord, RunStats, TypeBucket};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Lock-free counters for one category
#[derive(Debug, Default)]
struct BucketCounter {
    file_count: AtomicU64,
    total_bytes: AtomicU64,
}

/// Thread-safe sink for per-file outcomes.
///
/// Buckets are per-category atomics; each of the three lists has its own lock,
/// so workers touching different lists never contend. [`Aggregator::finish`]
/// consumes the aggregator, which is only possible once every worker holding
/// a reference has been joined.
#[derive(Debug)]
pub struct Aggregator {
    threshold_bytes: u64,
    buckets: [BucketCounter; Category::COUNT],
    unusual_permissions: Mutex<Vec<FileRecord>>,
    large_files: Mutex<Vec<FileRecord>>,
    unknown_extensions: Mutex<Vec<FileRecord>>,
    files_probed: AtomicU64,
    skipped_not_found: AtomicU64,
    skipped_permission_denied: AtomicU64,
    skipped_other: AtomicU64,
}

/// Everything the aggregator gathered, ready to become a `RunReport`
#[derive(Debug)]
pub struct Aggregate {
    pub buckets: BTreeMap<Category, TypeBucket>,
    pub unusual_permissions: Vec<FileRecord>,
    pub large_files: Vec<FileRecord>,
    pub unknown_extensions: Vec<FileRecord>,
    pub stats: RunStats,
}

impl Aggregator {
    pub fn new(threshold_bytes: u64) -> Self {
        Self {
            threshold_bytes,
            buckets: Default::default(),
            unusual_permissions: Mutex::new(Vec::new()),
            large_files: Mutex::new(Vec::new()),
            unknown_extensions: Mutex::new(Vec::new()),
            files_probed: AtomicU64::new(0),
            skipped_not_found: AtomicU64::new(0),
            skipped_permission_denied: AtomicU64::new(0),
            skipped_other: AtomicU64::new(0),
        }
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }

    /// Merge one file's outcome. Safe to call from any number of threads.
    pub fn contribute(&self, outcome: Result<FileRecord, ProbeError>) {
        match outcome {
            Ok(record) => self.record(record),
            Err(err) => self.skip(err),
        }
    }

    fn record(&self, record: FileRecord) {
        let bucket = &self.buckets[record.category.index()];
        bucket.file_count.fetch_add(1, Ordering::Relaxed);
        bucket.total_bytes.fetch_add(record.size_bytes, Ordering::Relaxed);
        self.files_probed.fetch_add(1, Ordering::Relaxed);

        if record.has_unusual_permissions() {
            push(&self.unusual_permissions, record.clone());
        }
        if record.is_large(self.threshold_bytes) {
            push(&self.large_files, record.clone());
        }
        if record.has_unknown_extension() {
            push(&self.unknown_extensions, record);
        }
    }

    fn skip(&self, err: ProbeError) {
        tracing::warn!("{}", err);
        let counter = match err {
            ProbeError::NotFound { .. } => &self.skipped_not_found,
            ProbeError::PermissionDenied { .. } => &self.skipped_permission_denied,
            ProbeError::Other { .. } => &self.skipped_other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Consume the aggregator once all contributions are in
    pub fn finish(self) -> Aggregate {
        let buckets = Category::ALL
            .iter()
            .filter_map(|&category| {
                let counter = &self.buckets[category.index()];
                let file_count = counter.file_count.load(Ordering::Relaxed);
                (file_count > 0).then(|| {
                    (
                        category,
                        TypeBucket {
                            category,
                            file_count,
                            total_bytes: counter.total_bytes.load(Ordering::Relaxed),
                        },
                    )
                })
            })
            .collect();

        let stats = RunStats {
            files_probed: self.files_probed.into_inner(),
            skipped_not_found: self.skipped_not_found.into_inner(),
            skipped_permission_denied: self.skipped_permission_denied.into_inner(),
            skipped_other: self.skipped_other.into_inner(),
            ..RunStats::default()
        };

        Aggregate {
            buckets,
            unusual_permissions: into_vec(self.unusual_permissions),
            large_files: into_vec(self.large_files),
            unknown_extensions: into_vec(self.unknown_extensions),
            stats,
        }
    }
}

fn push(list: &Mutex<Vec<FileRecord>>, record: FileRecord) {
    list.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(record);
}

fn into_vec(list: Mutex<Vec<FileRecord>>) -> Vec<FileRecord> {
    list.into_inner().unwrap_or_else(PoisonError::into_inner)
}
