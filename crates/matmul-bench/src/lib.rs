// File: crates/matmul-bench/src/lib.rs
// Summary: Matrix-multiplication strategies and the timing suite that feeds the chart.

pub mod cache;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod suite;

pub use cache::{cache_line_size, l1_cache_size, CacheInfo};
pub use error::BenchError;
pub use kernels::{cache_aware_matmul, cache_aware_matmul_1d, cache_oblivious_matmul, naive_matmul};
pub use matrix::Matrix;
pub use suite::{run_suite, write_results, SuiteConfig, TimingRow};
