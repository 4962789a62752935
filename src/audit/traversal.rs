use super::aggregate::Aggregator;
use super::error::AnalyzeError;
use super::probe::probe;
use super::types::RunReport;
use crate::parallel::{PoolConfig, WorkerPool, optimal_workers};
use crossbeam::channel::Sender;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default large-file threshold: 100 MiB
pub const DEFAULT_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;

/// Workers per CPU core when no explicit count is configured
pub const DEFAULT_WORKERS_PER_CPU: usize = 2;

/// Work queue slots per worker
pub const DEFAULT_QUEUE_PER_WORKER: usize = 4;

/// What the dispatcher saw while walking the tree
#[derive(Debug, Default)]
struct WalkTally {
    dispatched: u64,
    directories: u64,
    walk_errors: u64,
}

/// Traversal engine: walks a tree on the calling thread and fans per-file
/// probing out to a fixed pool of workers.
///
/// Each call to [`Analyzer::analyze`] is independent; nothing is carried
/// from one run to the next.
#[derive(Debug, Clone)]
pub struct Analyzer {
    workers: usize,
    queue_per_worker: usize,
    default_threshold_bytes: u64,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(optimal_workers(0, DEFAULT_WORKERS_PER_CPU))
    }
}

impl Analyzer {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_per_worker: DEFAULT_QUEUE_PER_WORKER,
            default_threshold_bytes: DEFAULT_THRESHOLD_BYTES,
        }
    }

    pub fn with_queue_per_worker(mut self, queue_per_worker: usize) -> Self {
        self.queue_per_worker = queue_per_worker.max(1);
        self
    }

    /// Threshold used when `analyze` is called without one. Zero keeps the built-in default.
    pub fn with_default_threshold(mut self, threshold_bytes: u64) -> Self {
        if threshold_bytes > 0 {
            self.default_threshold_bytes = threshold_bytes;
        }
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn default_threshold_bytes(&self) -> u64 {
        self.default_threshold_bytes
    }

    /// Walk `root`, probe every regular file and return the merged report.
    ///
    /// Fails with `InvalidThreshold` or `InvalidRoot` before any work is
    /// dispatched. Per-file errors are logged and counted, never returned.
    pub fn analyze(&self, root: &Path, threshold: Option<i64>) -> Result<RunReport, AnalyzeError> {
        let threshold_bytes = resolve_threshold(threshold, self.default_threshold_bytes)?;
        validate_root(root)?;

        let start_time = Instant::now();
        tracing::info!(
            root = %root.display(),
            threshold_bytes,
            workers = self.workers,
            "analyzing directory"
        );

        let aggregator = Aggregator::new(threshold_bytes);
        let pool = WorkerPool::new(PoolConfig {
            workers: self.workers,
            queue_per_worker: self.queue_per_worker,
        });

        let tally = pool
            .run(
                |files| dispatch_tree(root, files),
                |path: PathBuf, _worker_id| aggregator.contribute(probe(&path)),
            )
            .map_err(|_| AnalyzeError::WorkerPanic)?;

        let aggregate = aggregator.finish();
        let mut stats = aggregate.stats;
        stats.files_dispatched = tally.dispatched;
        stats.directories = tally.directories;
        stats.walk_errors = tally.walk_errors;
        stats.workers = self.workers;
        stats.duration_ms = start_time.elapsed().as_millis() as u64;

        debug_assert_eq!(stats.files_probed + stats.files_skipped(), stats.files_dispatched);

        tracing::info!(
            files = stats.files_probed,
            skipped = stats.files_skipped(),
            directories = stats.directories,
            duration_ms = stats.duration_ms,
            "analysis complete"
        );

        Ok(RunReport {
            root: root.to_path_buf(),
            threshold_bytes,
            buckets: aggregate.buckets,
            unusual_permissions: aggregate.unusual_permissions,
            large_files: aggregate.large_files,
            unknown_extensions: aggregate.unknown_extensions,
            stats,
        })
    }
}

/// One-shot convenience wrapper around [`Analyzer`]
pub fn analyze(
    root: &Path,
    threshold: Option<i64>,
    workers: usize,
) -> Result<RunReport, AnalyzeError> {
    Analyzer::new(workers).analyze(root, threshold)
}

/// Positive threshold in bytes; `None` falls back to `default_bytes`
pub fn resolve_threshold(threshold: Option<i64>, default_bytes: u64) -> Result<u64, AnalyzeError> {
    match threshold {
        None => Ok(default_bytes),
        Some(value) if value > 0 => Ok(value as u64),
        Some(value) => Err(AnalyzeError::InvalidThreshold(value)),
    }
}

pub fn validate_root(root: &Path) -> Result<(), AnalyzeError> {
    let invalid = |reason: &str| AnalyzeError::InvalidRoot {
        path: root.to_path_buf(),
        reason: reason.to_string(),
    };

    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(invalid("not a directory")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(invalid("does not exist")),
        Err(err) => Err(invalid(&err.to_string())),
    }
}

/// Enumerate the tree and send every regular file to the pool.
///
/// Symlinks are not followed and are not dispatched.
fn dispatch_tree(root: &Path, files: &Sender<PathBuf>) -> WalkTally {
    let mut tally = WalkTally::default();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for entry in walker {
        match entry {
            Ok(entry) => match entry.file_type() {
                Some(file_type) if file_type.is_dir() => tally.directories += 1,
                Some(file_type) if file_type.is_file() => {
                    if files.send(entry.into_path()).is_err() {
                        tracing::warn!("all workers stopped; abandoning traversal");
                        break;
                    }
                    tally.dispatched += 1;
                }
                _ => tracing::trace!(path = %entry.path().display(), "skipping non-regular entry"),
            },
            Err(err) => {
                tally.walk_errors += 1;
                tracing::warn!("Error walking directory: {}", err);
            }
        }
    }

    tally
}
