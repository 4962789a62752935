//! # fsaudit - parallel directory auditing
//!
//! Walks a directory tree, probes every regular file on a bounded pool of
//! worker threads, and merges the results into one report:
//!
//! - **File types**: count and total bytes per extension-derived category
//! - **Unusual permissions**: group/other write or execute bits set
//! - **Large files**: at or above a size threshold (default 100 MiB)
//! - **Unknown extensions**: anything the category table does not name
//!
//! ## Quick Start
//!
//! ```bash
//! # One-shot report
//! fsaudit scan ~/Downloads --threshold 1048576
//!
//! # Prompt loop (type 1 to exit)
//! fsaudit
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use fsaudit::audit::{Analyzer, Category};
//! use std::path::Path;
//!
//! let report = Analyzer::new(8).analyze(Path::new("/var/log"), Some(10 * 1024 * 1024))?;
//! if let Some(text) = report.bucket(Category::Text) {
//!     println!("{} text files, {} bytes", text.file_count, text.total_bytes);
//! }
//! # Ok::<(), fsaudit::audit::AnalyzeError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod parallel;
pub mod report;

pub use audit::{AnalyzeError, Analyzer, Category, FileRecord, RunReport, TypeBucket, analyze};
pub use cli::{Cli, Output};
pub use config::AuditConfig;

/// Result type alias for fsaudit application code
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
