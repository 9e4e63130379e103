// File: crates/matmul-bench/src/error.rs
// Summary: Failures of the kernels, the timing suite and the results writer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("matrix size must be positive")]
    EmptySize,

    #[error("matrix dimensions differ: a is {a}, b is {b}, c is {c}")]
    DimensionMismatch { a: usize, b: usize, c: usize },

    #[error("{kernel} result differs from the naive product at size {size}")]
    Mismatch { kernel: &'static str, size: usize },

    #[error("failed to build thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("writing results CSV")]
    Csv(#[from] csv::Error),

    #[error("writing results CSV")]
    Io(#[from] std::io::Error),
}
