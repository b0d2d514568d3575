// Aliquot
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Parallel Execution Coordinator
//!
//! Owns a fixed-size worker pool and runs one task per chunk. Workers only
//! share the read-only prime table and each returns its rows as an ordered
//! block. Blocks are concatenated in chunk creation order, so the output is
//! identical for every worker count no matter which task finishes first.
//!
//! The first failing task aborts the whole batch and no rows are returned.

use crate::error::{AliquotError, AliquotResult};
use crate::partition::{Chunk, partition};
use crate::row::ResultRow;
use crate::sieve::PrimeTable;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Batch parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Inclusive upper bound `N` of the range `[1, N]`
    pub upper_bound: u64,
    /// Degree of parallelism
    pub worker_count: usize,
    /// Explicit sieve limit in `[ceil(sqrt(N)) + 1, PrimeTable::MAX_LIMIT]`
    pub sieve_bound_override: Option<i64>,
}

impl BatchConfig {
    /// Config for `[1, upper_bound]` using every available processing unit
    pub fn new(upper_bound: u64) -> Self {
        Self {
            upper_bound,
            worker_count: default_worker_count(),
            sieve_bound_override: None,
        }
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_sieve_bound(mut self, bound: Option<i64>) -> Self {
        self.sieve_bound_override = bound;
        self
    }

    /// The sieve limit the batch will use
    pub fn sieve_bound(&self) -> i64 {
        // required_bound never exceeds 2^32 + 1
        self.sieve_bound_override.unwrap_or(PrimeTable::required_bound(self.upper_bound) as i64)
    }

    pub fn validate(&self) -> AliquotResult<()> {
        if self.upper_bound < 1 {
            return Err(AliquotError::invalid_range("upper bound N must be at least 1"));
        }
        if self.worker_count < 1 {
            return Err(AliquotError::invalid_range("worker count must be at least 1"));
        }
        if let Some(bound) = self.sieve_bound_override {
            let required = PrimeTable::required_bound(self.upper_bound);
            if bound < 0 || (bound as u64) < required {
                return Err(AliquotError::invalid_bound(
                    bound,
                    format!("a batch up to {} needs a sieve bound of at least {required}", self.upper_bound),
                ));
            }
            if (bound as u64) > PrimeTable::MAX_LIMIT {
                return Err(AliquotError::invalid_bound(
                    bound,
                    format!("no u64 range needs a sieve bound above {}", PrimeTable::MAX_LIMIT),
                ));
            }
        }
        Ok(())
    }
}

/// Number of logical CPUs
pub fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

/// Summary of a finished batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub upper_bound: u64,
    pub worker_count: usize,
    pub chunk_count: usize,
    pub sieve_bound: u64,
    pub prime_count: usize,
    pub elapsed: Duration,
}

/// Rows of a finished batch, ascending by `n`
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub rows: Vec<ResultRow>,
    pub report: BatchReport,
}

pub struct BatchCoordinator {
    config: BatchConfig,
    pool: ThreadPool,
}

impl BatchCoordinator {
    /// Validate `config` and start a pool of `config.worker_count` threads
    pub fn new(config: BatchConfig) -> AliquotResult<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .thread_name(|index| format!("aliquot-worker-{index}"))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Sieve, partition, compute and reassemble the whole range
    #[instrument(skip(self), fields(n = self.config.upper_bound, workers = self.config.worker_count))]
    pub fn run(&self) -> AliquotResult<BatchOutput> {
        let started = Instant::now();

        let table = PrimeTable::sieve(self.config.sieve_bound())?;
        let chunks = partition(self.config.upper_bound, self.config.worker_count)?;
        debug!(primes = table.len(), chunks = chunks.len(), "batch prepared");

        let rows = self.run_chunks(&table, &chunks)?;

        let report = BatchReport {
            upper_bound: self.config.upper_bound,
            worker_count: self.config.worker_count,
            chunk_count: chunks.len(),
            sieve_bound: table.limit(),
            prime_count: table.len(),
            elapsed: started.elapsed(),
        };
        info!(rows = rows.len(), elapsed = ?report.elapsed, "batch complete");

        Ok(BatchOutput { rows, report })
    }

    /// Compute every chunk on the pool and concatenate blocks in chunk order
    pub fn run_chunks(&self, table: &PrimeTable, chunks: &[Chunk]) -> AliquotResult<Vec<ResultRow>> {
        self.gather(chunks, |chunk| process_chunk(table, chunk))
    }

    fn gather<F>(&self, chunks: &[Chunk], work: F) -> AliquotResult<Vec<ResultRow>>
    where
        F: Fn(&Chunk) -> AliquotResult<Vec<ResultRow>> + Sync,
    {
        let blocks: Vec<Vec<ResultRow>> = self.pool.install(|| chunks.par_iter().map(&work).collect::<AliquotResult<_>>())?;

        let total = blocks.iter().map(Vec::len).sum();
        let mut rows = Vec::with_capacity(total);
        for block in blocks {
            rows.extend(block);
        }
        Ok(rows)
    }
}

/// Rows for every `n` in `chunk`, ascending
pub fn process_chunk(table: &PrimeTable, chunk: &Chunk) -> AliquotResult<Vec<ResultRow>> {
    let started = Instant::now();
    let rows = chunk.values().map(|n| ResultRow::compute(n, table)).collect::<AliquotResult<Vec<_>>>()?;
    debug!(%chunk, elapsed = ?started.elapsed(), "chunk complete");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, mpsc};

    fn run(upper_bound: u64, workers: usize) -> Vec<ResultRow> {
        let config = BatchConfig::new(upper_bound).with_workers(workers);
        BatchCoordinator::new(config).unwrap().run().unwrap().rows
    }

    #[test]
    fn test_rows_are_ascending_and_complete() {
        let rows = run(1_000, 4);
        let ns: Vec<u64> = rows.iter().map(|r| r.n).collect();
        assert_eq!(ns, (1..=1_000).collect::<Vec<_>>());
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let sequential = run(5_000, 1);
        for workers in [2, 3, 8, 13] {
            assert_eq!(run(5_000, workers), sequential, "workers = {workers}");
        }
    }

    #[test]
    fn test_more_workers_than_values() {
        let rows = run(2, 8);
        assert_eq!(rows.iter().map(|r| r.n).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rows[0].factorization, "1");
        assert_eq!(rows[1].factorization, "2");
    }

    #[test]
    fn test_chunk_order_wins_over_completion_order() {
        let coordinator = BatchCoordinator::new(BatchConfig::new(100).with_workers(4)).unwrap();
        let table = PrimeTable::for_upper_bound(100).unwrap();
        let chunks = partition(100, 4).unwrap();

        let (done_tx, done_rx) = mpsc::channel::<u64>();
        let done_rx = Mutex::new(done_rx);
        let finished = Mutex::new(Vec::new());

        let rows = coordinator
            .gather(&chunks, |chunk| {
                if chunk.start() == 1 {
                    // hold the first chunk until every other chunk has finished
                    let rx = done_rx.lock().unwrap();
                    for _ in 1..chunks.len() {
                        rx.recv_timeout(Duration::from_secs(30)).unwrap();
                    }
                }
                let rows = process_chunk(&table, chunk)?;
                finished.lock().unwrap().push(chunk.start());
                done_tx.send(chunk.start()).unwrap();
                Ok(rows)
            })
            .unwrap();

        let finished = finished.into_inner().unwrap();
        assert_eq!(finished.len(), 4);
        assert_eq!(finished.last(), Some(&1));
        assert_eq!(rows, run(100, 1));
    }

    #[test]
    fn test_report() {
        let output = BatchCoordinator::new(BatchConfig::new(17).with_workers(4)).unwrap().run().unwrap();
        assert_eq!(output.report.chunk_count, 4);
        assert_eq!(output.report.sieve_bound, 6);
        assert_eq!(output.report.prime_count, 3);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(BatchCoordinator::new(BatchConfig::new(0)), Err(AliquotError::InvalidRange { .. })));
        assert!(matches!(BatchCoordinator::new(BatchConfig::new(10).with_workers(0)), Err(AliquotError::InvalidRange { .. })));
        assert!(matches!(
            BatchCoordinator::new(BatchConfig::new(10_000).with_sieve_bound(Some(50))),
            Err(AliquotError::InvalidBound { bound: 50, .. })
        ));
        assert!(matches!(BatchCoordinator::new(BatchConfig::new(10).with_sieve_bound(Some(-1))), Err(AliquotError::InvalidBound { .. })));
    }

    #[test]
    fn test_oversized_sieve_override_is_rejected() {
        assert!(matches!(
            BatchCoordinator::new(BatchConfig::new(10).with_sieve_bound(Some(1 << 50))),
            Err(AliquotError::InvalidBound { bound, .. }) if bound == 1 << 50
        ));
        let largest = PrimeTable::MAX_LIMIT as i64;
        assert!(BatchConfig::new(u64::MAX).with_sieve_bound(Some(largest)).validate().is_ok());
        assert!(matches!(BatchConfig::new(u64::MAX).with_sieve_bound(Some(largest + 1)).validate(), Err(AliquotError::InvalidBound { .. })));
    }

    #[test]
    fn test_larger_sieve_override_gives_same_rows() {
        let config = BatchConfig::new(2_000).with_workers(3).with_sieve_bound(Some(500));
        let rows = BatchCoordinator::new(config).unwrap().run().unwrap().rows;
        assert_eq!(rows, run(2_000, 3));
    }

    #[test]
    fn test_failure_in_one_chunk_aborts_batch() {
        let coordinator = BatchCoordinator::new(BatchConfig::new(100).with_workers(2)).unwrap();
        // too small for the second chunk
        let table = PrimeTable::sieve(3).unwrap();
        let chunks = [Chunk::new(1, 10).unwrap(), Chunk::new(11, 100).unwrap()];
        assert!(matches!(coordinator.run_chunks(&table, &chunks), Err(AliquotError::InvalidBound { .. })));
    }
}
