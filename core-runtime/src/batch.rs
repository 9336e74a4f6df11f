//! # Batch Scheduling Primitives
//!
//! The enrichment and artwork pipelines share one throttling policy: assets
//! are partitioned into fixed-size groups processed sequentially, items within
//! a group run concurrently, and a short delay separates groups so device I/O
//! and the host render loop are never starved at the same time.
//!
//! [`for_each_batch`] makes that policy explicit and cancellable instead of
//! relying on fire-and-forget tasks: batch *n+1* never starts before batch
//! *n*'s items have all settled, at most `batch_size` operations are in
//! flight at any instant, and a cancelled scheduler lets in-flight items
//! complete while discarding their results.
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::batch::{for_each_batch, BatchConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let token = CancellationToken::new();
//! let outcome = for_each_batch(
//!     vec![1, 2, 3, 4, 5, 6, 7],
//!     &BatchConfig::default(),
//!     &token,
//!     |n| async move { n * 2 },
//!     |batch| async move { println!("batch done: {:?}", batch) },
//! )
//! .await;
//! # let _ = outcome;
//! # }
//! ```

use futures::future;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default number of items processed concurrently per batch.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default delay between batches, yielding to the host's render loop.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(10);

/// Batch throttling policy.
///
/// Tunable without semantic change; the defaults match the shipped mobile
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Items processed concurrently within one batch.
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub batch_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

impl BatchConfig {
    /// Policy with a custom batch size and the default delay.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            ..Self::default()
        }
    }

    /// Number of batches needed for `item_count` items.
    pub fn batch_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.batch_size.max(1))
    }
}

/// How a batch run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every batch ran and was delivered to the sink.
    Completed { batches: usize },
    /// The token was cancelled; `batches` groups were delivered before the
    /// run stopped. Results of any in-flight group are discarded.
    Cancelled { batches: usize },
}

impl BatchOutcome {
    /// Batches delivered to the sink.
    pub fn batches(&self) -> usize {
        match self {
            BatchOutcome::Completed { batches } | BatchOutcome::Cancelled { batches } => *batches,
        }
    }
}

/// Process `items` in sequential fixed-size batches.
///
/// `op` runs once per item, concurrently within a batch. After every batch
/// settles, its results are handed to `sink` before the next batch starts
/// (the progressive-reveal hook). Cancellation is observed between batches and
/// again after a batch settles (in-flight items complete; their results are
/// then discarded rather than delivered).
pub async fn for_each_batch<T, R, Op, OpFut, Sink, SinkFut>(
    items: Vec<T>,
    config: &BatchConfig,
    cancel: &CancellationToken,
    mut op: Op,
    mut sink: Sink,
) -> BatchOutcome
where
    Op: FnMut(T) -> OpFut,
    OpFut: Future<Output = R>,
    Sink: FnMut(Vec<R>) -> SinkFut,
    SinkFut: Future<Output = ()>,
{
    let batch_size = config.batch_size.max(1);
    let total_batches = config.batch_count(items.len());
    let mut iter = items.into_iter();
    let mut delivered = 0usize;

    loop {
        if cancel.is_cancelled() {
            debug!(delivered, total_batches, "Batch run cancelled");
            return BatchOutcome::Cancelled { batches: delivered };
        }

        let chunk: Vec<T> = iter.by_ref().take(batch_size).collect();
        if chunk.is_empty() {
            break;
        }

        let results = future::join_all(chunk.into_iter().map(&mut op)).await;

        if cancel.is_cancelled() {
            debug!(delivered, total_batches, "Batch run cancelled mid-flight");
            return BatchOutcome::Cancelled { batches: delivered };
        }

        sink(results).await;
        delivered += 1;

        if delivered < total_batches && !config.batch_delay.is_zero() {
            tokio::time::sleep(config.batch_delay).await;
        }
    }

    BatchOutcome::Completed { batches: delivered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn fast_config(batch_size: usize) -> BatchConfig {
        BatchConfig {
            batch_size,
            batch_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn batch_count_rounds_up() {
        let config = BatchConfig::with_batch_size(5);
        assert_eq!(config.batch_count(0), 0);
        assert_eq!(config.batch_count(5), 1);
        assert_eq!(config.batch_count(7), 2);
        assert_eq!(config.batch_count(10), 2);
        assert_eq!(config.batch_count(11), 3);
    }

    #[tokio::test]
    async fn processes_all_items_in_order_of_batches() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();

        let outcome = for_each_batch(
            (0..7).collect(),
            &fast_config(3),
            &CancellationToken::new(),
            |n: i32| async move { n },
            move |batch| {
                let sink_seen = sink_seen.clone();
                async move {
                    sink_seen.lock().unwrap().push(batch);
                }
            },
        )
        .await;

        assert_eq!(outcome, BatchOutcome::Completed { batches: 3 });
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![0, 1, 2]);
        assert_eq!(seen[1], vec![3, 4, 5]);
        assert_eq!(seen[2], vec![6]);
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_batch_size() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));

        let op_in_flight = in_flight.clone();
        let op_max = max_in_flight.clone();

        let outcome = for_each_batch(
            (0..12).collect::<Vec<i32>>(),
            &fast_config(4),
            &CancellationToken::new(),
            move |_n| {
                let in_flight = op_in_flight.clone();
                let max = op_max.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            },
            |_batch| async {},
        )
        .await;

        assert_eq!(outcome, BatchOutcome::Completed { batches: 3 });
        assert!(max_in_flight.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn cancellation_stops_following_batches() {
        let token = CancellationToken::new();
        let sink_token = token.clone();
        let delivered = Arc::new(AtomicUsize::new(0));
        let sink_delivered = delivered.clone();

        let outcome = for_each_batch(
            (0..20).collect::<Vec<i32>>(),
            &fast_config(5),
            &token,
            |n| async move { n },
            move |_batch| {
                let token = sink_token.clone();
                let delivered = sink_delivered.clone();
                async move {
                    delivered.fetch_add(1, Ordering::SeqCst);
                    // Tear down after the first delivered batch.
                    token.cancel();
                }
            },
        )
        .await;

        assert_eq!(outcome, BatchOutcome::Cancelled { batches: 1 });
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_completes_without_sink_calls() {
        let called = Arc::new(AtomicUsize::new(0));
        let sink_called = called.clone();

        let outcome = for_each_batch(
            Vec::<i32>::new(),
            &BatchConfig::default(),
            &CancellationToken::new(),
            |n| async move { n },
            move |_batch| {
                let called = sink_called.clone();
                async move {
                    called.fetch_add(1, Ordering::SeqCst);
                }
            },
        )
        .await;

        assert_eq!(outcome, BatchOutcome::Completed { batches: 0 });
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }
}
