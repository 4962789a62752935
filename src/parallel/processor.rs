use crossbeam::channel::{Receiver, Sender, bounded};
use thiserror::Error;

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads (always at least 1)
    pub workers: usize,
    /// Work queue capacity per worker (queue = workers * multiplier)
    pub queue_per_worker: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: optimal_workers(0, 2),
            queue_per_worker: 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("thread panic occurred during parallel processing")]
    WorkerPanic,
}

/// Worker count: `configured` when non-zero, otherwise `per_cpu` workers per core
pub fn optimal_workers(configured: usize, per_cpu: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        std::cmp::max(1, num_cpus::get() * per_cpu)
    }
}

/// Fixed-size pool of scoped workers fed through a bounded channel.
///
/// The producer runs on the calling thread and streams work items as it
/// discovers them; it blocks when the queue is full. `run` returns only after
/// every worker has drained the queue and exited.
pub struct WorkerPool {
    config: PoolConfig,
}

impl WorkerPool {
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }

    pub fn workers(&self) -> usize {
        self.config.workers.max(1)
    }

    fn queue_capacity(&self) -> usize {
        self.workers() * self.config.queue_per_worker.max(1)
    }

    /// Run `produce` on the calling thread while `worker_fn(item, worker_id)`
    /// handles every item it sends.
    ///
    /// `produce` should stop sending once `send` fails, which means every
    /// worker has gone away.
    pub fn run<T, O, P, F>(&self, produce: P, worker_fn: F) -> Result<O, PoolError>
    where
        T: Send,
        P: FnOnce(&Sender<T>) -> O,
        F: Fn(T, usize) + Sync,
    {
        let workers = self.workers();
        let (work_tx, work_rx): (Sender<T>, Receiver<T>) = bounded(self.queue_capacity());

        crossbeam::thread::scope(|s| {
            let worker_fn = &worker_fn;

            for worker_id in 0..workers {
                let work_rx = work_rx.clone();
                s.spawn(move |_| {
                    let mut handled = 0usize;
                    while let Ok(item) = work_rx.recv() {
                        worker_fn(item, worker_id);
                        handled += 1;
                    }
                    tracing::debug!(worker_id, handled, "worker finished");
                });
            }

            // Only workers hold receivers, so a send fails once they are all gone
            drop(work_rx);

            let output = produce(&work_tx);

            // Close the queue so workers exit after draining it
            drop(work_tx);
            output
        })
        .map_err(|_| PoolError::WorkerPanic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pool(workers: usize) -> WorkerPool {
        WorkerPool::new(PoolConfig {
            workers,
            queue_per_worker: 2,
        })
    }

    #[test]
    fn test_every_item_is_handled_once() {
        let seen = Mutex::new(Vec::new());

        let sent = pool(4)
            .run(
                |tx| {
                    let mut sent = 0;
                    for i in 0..1000 {
                        if tx.send(i).is_err() {
                            break;
                        }
                        sent += 1;
                    }
                    sent
                },
                |item, _worker_id| seen.lock().unwrap().push(item),
            )
            .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(sent, 1000);
        assert_eq!(seen, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_worker_ids_are_within_pool() {
        let max_id = AtomicUsize::new(0);

        pool(3)
            .run(
                |tx| {
                    for i in 0..100 {
                        let _ = tx.send(i);
                    }
                },
                |_item: i32, worker_id| {
                    max_id.fetch_max(worker_id, Ordering::Relaxed);
                },
            )
            .unwrap();

        assert!(max_id.load(Ordering::Relaxed) < 3);
    }

    #[test]
    fn test_no_work_returns_producer_output() {
        let output = pool(2).run(|_tx: &Sender<u8>| "done", |_item, _id| {}).unwrap();
        assert_eq!(output, "done");
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let result = pool(2).run(
            |tx| {
                for i in 0..10 {
                    if tx.send(i).is_err() {
                        break;
                    }
                }
            },
            |item: i32, _id| {
                if item == 3 {
                    panic!("boom");
                }
            },
        );

        assert!(matches!(result, Err(PoolError::WorkerPanic)));
    }

    #[test]
    fn test_optimal_workers() {
        assert_eq!(optimal_workers(7, 2), 7);
        assert!(optimal_workers(0, 2) >= 2);
        assert_eq!(optimal_workers(0, 0), 1);
    }

    #[test]
    fn test_zero_workers_is_clamped() {
        assert_eq!(pool(0).workers(), 1);
    }
}
