// File: crates/matmul-bench/tests/kernels.rs
// Purpose: Every strategy produces the naive product, including odd and non-power-of-two sizes.

use matmul_bench::kernels::{block_size, OBLIVIOUS_CUTOFF, TILE};
use matmul_bench::{BenchError, cache_aware_matmul, cache_aware_matmul_1d, cache_oblivious_matmul, naive_matmul, Matrix};

fn inputs(n: usize) -> (Matrix, Matrix) {
    let a = Matrix::from_fn(n, |i, j| ((i * 7 + j * 3) % 7) as i32 - 3);
    let b = Matrix::from_fn(n, |i, j| ((i * 5 + j * 11) % 5) as i32 - 2);
    (a, b)
}

fn reference(a: &Matrix, b: &Matrix) -> Matrix {
    let mut c = Matrix::zeros(a.dim());
    naive_matmul(a, b, &mut c).unwrap();
    c
}

// Sizes straddle the recursion cutoff and the tile edge.
const SIZES: [usize; 7] = [0, 1, 3, OBLIVIOUS_CUTOFF, OBLIVIOUS_CUTOFF + 1, 2 * TILE + 5, 200];

#[test]
fn naive_matches_definition() {
    let (a, b) = inputs(5);
    let c = reference(&a, &b);
    for i in 0..5 {
        for j in 0..5 {
            let want: i32 = (0..5).map(|k| a[(i, k)] * b[(k, j)]).sum();
            assert_eq!(c[(i, j)], want, "c[{i},{j}]");
        }
    }
}

#[test]
fn cache_aware_matches_naive() {
    for n in SIZES {
        let (a, b) = inputs(n);
        // Small L1 forces several blocks per dimension.
        for l1 in [12 * 16, 32 * 1024] {
            let mut c = Matrix::zeros(n);
            cache_aware_matmul(&a, &b, &mut c, l1).unwrap();
            assert_eq!(c, reference(&a, &b), "n={n} l1={l1} block={}", block_size(l1, n));
        }
    }
}

#[test]
fn cache_oblivious_matches_naive() {
    for n in SIZES {
        let (a, b) = inputs(n);
        let mut c = Matrix::zeros(n);
        cache_oblivious_matmul(&a, &b, &mut c).unwrap();
        assert_eq!(c, reference(&a, &b), "n={n}");
    }
}

#[test]
fn parallel_tiled_matches_naive() {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
    for n in SIZES {
        let (a, b) = inputs(n);
        let mut c = Matrix::zeros(n);
        pool.install(|| cache_aware_matmul_1d(&a, &b, &mut c)).unwrap();
        assert_eq!(c, reference(&a, &b), "n={n}");
    }
}

#[test]
fn kernels_accumulate_into_c() {
    let n = 4;
    let a = Matrix::filled(n, 1);
    let b = Matrix::filled(n, 1);
    let mut c = Matrix::filled(n, 10);
    cache_oblivious_matmul(&a, &b, &mut c).unwrap();
    assert_eq!(c, Matrix::filled(n, 14));
}

#[test]
fn mismatched_dimensions_fail_every_kernel() {
    let (a, b) = (Matrix::zeros(3), Matrix::zeros(2));
    let mut c = Matrix::filled(3, 7);
    let results = [
        naive_matmul(&a, &b, &mut c),
        cache_aware_matmul(&a, &b, &mut c, 32 * 1024),
        cache_oblivious_matmul(&a, &b, &mut c),
        cache_aware_matmul_1d(&a, &b, &mut c),
    ];
    for r in results {
        assert!(matches!(r, Err(BenchError::DimensionMismatch { a: 3, b: 2, c: 3 })), "got {r:?}");
    }
    // Nothing was accumulated.
    assert_eq!(c, Matrix::filled(3, 7));
}
