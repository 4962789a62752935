//! Bounded worker pool
//!
//! Resource management only: how many workers, how deep the queue, and the
//! join point. What a worker does with an item is up to the caller.
//!
//! ```text
//! producer (calling thread) ──bounded queue──▶ worker 0..N ──▶ caller's sink
//! ```
//!
//! # Example
//!
//! ```rust
//! use fsaudit::parallel::{PoolConfig, WorkerPool};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let total = AtomicUsize::new(0);
//! let pool = WorkerPool::new(PoolConfig { workers: 4, queue_per_worker: 2 });
//! pool.run(
//!     |tx| {
//!         for n in 1..=10 {
//!             let _ = tx.send(n);
//!         }
//!     },
//!     |n, _worker_id| {
//!         total.fetch_add(n, Ordering::Relaxed);
//!     },
//! )?;
//! assert_eq!(total.load(Ordering::Relaxed), 55);
//! # Ok::<(), fsaudit::parallel::PoolError>(())
//! ```

pub mod processor;

pub use processor::{PoolConfig, PoolError, WorkerPool, optimal_workers};
