//! Stress tests for the comparators.
//!
//! Comparators are shared, stateless statics. These runs sort the same
//! cells from many threads at once and check that every thread arrives at
//! the order a single-threaded reference sort produced.

use crate::fixtures::Backing;
use crate::generators::CellFields;
use cellkey_core::{sort_cells, AnyCell, CellComparator};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Operations whose outcome matched the reference.
    pub successful_ops: usize,
    /// Operations whose outcome diverged from the reference.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Sorts or comparisons each thread performs.
    pub rounds: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Number of cells in the working set.
    pub cell_count: usize,
    /// Seed for the working set and shuffles.
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            rounds: 16,
            threads: 4,
            cell_count: 512,
            seed: 0x5eed,
        }
    }
}

const KEY_BYTES: [u8; 5] = [b'a', b'b', b',', b'!', 0xff];

/// Builds a seeded working set of cells that collide on rows and columns.
pub fn random_cells(config: &StressConfig) -> Vec<AnyCell> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let key = |rng: &mut StdRng, max: usize| -> Vec<u8> {
        let len = rng.gen_range(0..=max);
        (0..len)
            .map(|_| *KEY_BYTES.choose(rng).unwrap_or(&b'a'))
            .collect()
    };

    (0..config.cell_count)
        .map(|i| {
            let fields = CellFields {
                row: key(&mut rng, 4),
                family: key(&mut rng, 2),
                qualifier: key(&mut rng, 2),
                value: Vec::new(),
                timestamp: rng.gen_range(0..8),
                type_byte: *[0u8, 4, 8, 12, 14, 255].choose(&mut rng).unwrap_or(&4),
                sequence_id: rng.gen_range(0..4),
            };
            fields.build(Backing::ALL[i % 2])
        })
        .collect()
}

/// Sorts shuffled copies of `cells` on every thread and counts the sorts
/// that reproduce the single-threaded reference order.
pub fn stress_concurrent_sorts(
    comparator: &'static dyn CellComparator,
    cells: &[AnyCell],
    config: &StressConfig,
) -> StressTestResult {
    let mut reference = cells.to_vec();
    sort_cells(comparator, &mut reference);

    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|scope| {
        for t in 0..config.threads {
            let reference = &reference;
            let successful = &successful;
            let failed = &failed;
            let seed = config.seed.wrapping_add(t as u64 + 1);
            let rounds = config.rounds;

            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..rounds {
                    let mut local = cells.to_vec();
                    local.shuffle(&mut rng);
                    sort_cells(comparator, &mut local);

                    let same = local
                        .iter()
                        .zip(reference)
                        .all(|(a, b)| comparator.compare(a, b, false) == Ordering::Equal);
                    if same {
                        successful.fetch_add(1, AtomicOrdering::Relaxed);
                    } else {
                        failed.fetch_add(1, AtomicOrdering::Relaxed);
                    }
                }
            });
        }
    });

    let result = StressTestResult::new(
        successful.load(AtomicOrdering::Relaxed),
        failed.load(AtomicOrdering::Relaxed),
        start.elapsed(),
    );
    tracing::debug!(
        comparator = %comparator.kind(),
        threads = config.threads,
        sorts = result.total_ops,
        failed = result.failed_ops,
        "concurrent sort run finished"
    );
    result
}

/// Compares random pairs from every thread and counts the pairs whose
/// result is the reverse of the swapped comparison.
pub fn stress_concurrent_compares(
    comparator: &'static dyn CellComparator,
    cells: &[AnyCell],
    config: &StressConfig,
) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    if cells.is_empty() {
        return StressTestResult::new(0, 0, start.elapsed());
    }

    thread::scope(|scope| {
        for t in 0..config.threads {
            let successful = &successful;
            let failed = &failed;
            let seed = config.seed.wrapping_add(t as u64 + 1);
            let ops = config.rounds * cells.len();

            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..ops {
                    let left = &cells[rng.gen_range(0..cells.len())];
                    let right = &cells[rng.gen_range(0..cells.len())];
                    let ignore_sequence = rng.gen_bool(0.5);
                    let forward = comparator.compare(left, right, ignore_sequence);
                    let backward = comparator.compare(right, left, ignore_sequence);
                    if forward == backward.reverse() {
                        successful.fetch_add(1, AtomicOrdering::Relaxed);
                    } else {
                        failed.fetch_add(1, AtomicOrdering::Relaxed);
                    }
                }
            });
        }
    });

    let result = StressTestResult::new(
        successful.load(AtomicOrdering::Relaxed),
        failed.load(AtomicOrdering::Relaxed),
        start.elapsed(),
    );
    tracing::debug!(
        comparator = %comparator.kind(),
        threads = config.threads,
        compares = result.total_ops,
        failed = result.failed_ops,
        "concurrent compare run finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellkey_core::{CATALOG, STANDARD};

    fn small() -> StressConfig {
        StressConfig {
            rounds: 4,
            threads: 4,
            cell_count: 128,
            ..Default::default()
        }
    }

    #[test]
    fn test_random_cells_are_seeded() {
        let config = small();
        let a = random_cells(&config);
        let b = random_cells(&config);
        assert_eq!(a.len(), 128);
        assert_eq!(a, b);
    }

    #[test]
    fn test_concurrent_standard_sorts() {
        crate::fixtures::init_test_tracing();
        let config = small();
        let cells = random_cells(&config);
        let result = stress_concurrent_sorts(&STANDARD, &cells, &config);
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 16);
    }

    #[test]
    fn test_concurrent_catalog_sorts() {
        let config = small();
        let cells = random_cells(&config);
        let result = stress_concurrent_sorts(&CATALOG, &cells, &config);
        assert_eq!(result.failed_ops, 0);
    }

    #[test]
    fn test_concurrent_compares() {
        let config = StressConfig {
            rounds: 2,
            ..small()
        };
        let cells = random_cells(&config);
        let result = stress_concurrent_compares(&STANDARD, &cells, &config);
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.total_ops, 4 * 2 * 128);
    }

    #[test]
    fn test_empty_working_set() {
        let result = stress_concurrent_compares(&CATALOG, &[], &small());
        assert_eq!(result.total_ops, 0);
    }
}
