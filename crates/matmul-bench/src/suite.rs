// File: crates/matmul-bench/src/suite.rs
// Summary: Times every kernel per matrix size and writes the results CSV the plotter reads.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::cache::CacheInfo;
use crate::error::BenchError;
use crate::kernels::{cache_aware_matmul, cache_aware_matmul_1d, cache_oblivious_matmul, naive_matmul};
use crate::matrix::Matrix;

/// Header of the results file, in column order.
pub const CSV_HEADER: [&str; 5] = ["Size", "Naive", "CacheAware", "CacheOblivious", "CacheAware1D"];

/// Elapsed milliseconds of each kernel at one size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimingRow {
    #[serde(rename = "Size")]
    pub size: usize,
    #[serde(rename = "Naive")]
    pub naive: f64,
    #[serde(rename = "CacheAware")]
    pub cache_aware: f64,
    #[serde(rename = "CacheOblivious")]
    pub cache_oblivious: f64,
    #[serde(rename = "CacheAware1D")]
    pub cache_aware_1d: f64,
}

#[derive(Clone, Debug)]
pub struct SuiteConfig {
    pub sizes: Vec<usize>,
    /// Worker threads for the parallel kernel.
    pub threads: usize,
    pub cache: CacheInfo,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sizes: vec![128, 256, 512],
            threads: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            cache: CacheInfo::default(),
        }
    }
}

fn time_ms(f: impl FnOnce() -> Result<(), BenchError>) -> Result<f64, BenchError> {
    let start = Instant::now();
    f()?;
    Ok(start.elapsed().as_secs_f64() * 1e3)
}

/// Run all kernels on all-ones matrices for each size, in order.
/// Every kernel's product is checked against the naive one.
pub fn run_suite(config: &SuiteConfig) -> Result<Vec<TimingRow>, BenchError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads.max(1)).build()?;
    info!(
        sizes = ?config.sizes,
        threads = pool.current_num_threads(),
        l1_size = config.cache.l1_size,
        line_size = config.cache.line_size,
        "running matmul suite"
    );
    config.sizes.iter().map(|&n| run_size(n, &pool, &config.cache)).collect()
}

fn run_size(n: usize, pool: &rayon::ThreadPool, cache: &CacheInfo) -> Result<TimingRow, BenchError> {
    if n == 0 {
        return Err(BenchError::EmptySize);
    }
    let a = Matrix::filled(n, 1);
    let b = Matrix::filled(n, 1);
    let mut c = Matrix::zeros(n);

    let naive = time_ms(|| naive_matmul(&a, &b, &mut c))?;
    let expected = c.clone();

    c.clear();
    let cache_aware = time_ms(|| cache_aware_matmul(&a, &b, &mut c, cache.l1_size))?;
    verify(&c, &expected, "CacheAware", n)?;

    c.clear();
    let cache_oblivious = time_ms(|| cache_oblivious_matmul(&a, &b, &mut c))?;
    verify(&c, &expected, "CacheOblivious", n)?;

    c.clear();
    let cache_aware_1d = time_ms(|| pool.install(|| cache_aware_matmul_1d(&a, &b, &mut c)))?;
    verify(&c, &expected, "CacheAware1D", n)?;

    info!(size = n, naive, cache_aware, cache_oblivious, cache_aware_1d, "timed size");
    Ok(TimingRow { size: n, naive, cache_aware, cache_oblivious, cache_aware_1d })
}

fn verify(got: &Matrix, want: &Matrix, kernel: &'static str, size: usize) -> Result<(), BenchError> {
    if got == want { Ok(()) } else { Err(BenchError::Mismatch { kernel, size }) }
}

/// Write `rows` under [`CSV_HEADER`], replacing any existing file.
pub fn write_results(path: impl AsRef<Path>, rows: &[TimingRow]) -> Result<(), BenchError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote results");
    Ok(())
}
