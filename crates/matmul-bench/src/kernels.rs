// File: crates/matmul-bench/src/kernels.rs
// Summary: The four multiplication strategies. Each accumulates C += A * B on square matrices
// of one size and fails with `DimensionMismatch` otherwise.

use rayon::prelude::*;

use crate::error::BenchError;
use crate::matrix::Matrix;

/// Largest sub-problem side the cache-oblivious recursion hands to the plain loop.
pub const OBLIVIOUS_CUTOFF: usize = 64;
/// Tile side for the parallel flat-buffer kernel.
pub const TILE: usize = 64;

fn check_dims(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<usize, BenchError> {
    let n = a.dim();
    if b.dim() != n || c.dim() != n {
        return Err(BenchError::DimensionMismatch { a: n, b: b.dim(), c: c.dim() });
    }
    Ok(n)
}

// c_row[..] += aik * b_row[..]
#[inline]
fn axpy(c_row: &mut [i32], aik: i32, b_row: &[i32]) {
    for (cij, &bkj) in c_row.iter_mut().zip(b_row) {
        *cij += aik * bkj;
    }
}

/// Plain i-k-j triple loop.
pub fn naive_matmul(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<(), BenchError> {
    let n = check_dims(a, b, c)?;
    for i in 0..n {
        let c_row = c.row_mut(i);
        for (k, &aik) in a.row(i).iter().enumerate() {
            axpy(c_row, aik, b.row(k));
        }
    }
    Ok(())
}

/// Block side so that one block each of A, B and C fits in `l1_bytes`, clamped to `[1, n]`.
pub fn block_size(l1_bytes: usize, n: usize) -> usize {
    (l1_bytes / (3 * std::mem::size_of::<i32>())).clamp(1, n.max(1))
}

/// Tiled loop with the block side derived from the L1 data cache size.
pub fn cache_aware_matmul(a: &Matrix, b: &Matrix, c: &mut Matrix, l1_bytes: usize) -> Result<(), BenchError> {
    let n = check_dims(a, b, c)?;
    let block = block_size(l1_bytes, n);
    for ii in (0..n).step_by(block) {
        let i_end = (ii + block).min(n);
        for jj in (0..n).step_by(block) {
            let j_end = (jj + block).min(n);
            for kk in (0..n).step_by(block) {
                let k_end = (kk + block).min(n);
                for i in ii..i_end {
                    let c_row = &mut c.row_mut(i)[jj..j_end];
                    for k in kk..k_end {
                        axpy(c_row, a[(i, k)], &b.row(k)[jj..j_end]);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Sub-problem: rows of C/A, inner (k) range, columns of C/B.
#[derive(Clone, Copy, Debug)]
struct Span {
    row: usize,
    rows: usize,
    inner: usize,
    depth: usize,
    col: usize,
    cols: usize,
}

/// Recursive halving of the largest dimension until every side is at most [`OBLIVIOUS_CUTOFF`].
/// Works for any `n`, not just powers of two.
pub fn cache_oblivious_matmul(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<(), BenchError> {
    let n = check_dims(a, b, c)?;
    let whole = Span { row: 0, rows: n, inner: 0, depth: n, col: 0, cols: n };
    oblivious(a.as_slice(), b.as_slice(), c.as_mut_slice(), n, whole);
    Ok(())
}

fn oblivious(a: &[i32], b: &[i32], c: &mut [i32], n: usize, s: Span) {
    if s.rows == 0 || s.depth == 0 || s.cols == 0 {
        return;
    }
    let largest = s.rows.max(s.depth).max(s.cols);
    if largest <= OBLIVIOUS_CUTOFF {
        for i in s.row..s.row + s.rows {
            let c_row = &mut c[i * n + s.col..i * n + s.col + s.cols];
            for k in s.inner..s.inner + s.depth {
                axpy(c_row, a[i * n + k], &b[k * n + s.col..k * n + s.col + s.cols]);
            }
        }
        return;
    }

    if largest == s.rows {
        let h = s.rows / 2;
        oblivious(a, b, c, n, Span { rows: h, ..s });
        oblivious(a, b, c, n, Span { row: s.row + h, rows: s.rows - h, ..s });
    } else if largest == s.cols {
        let h = s.cols / 2;
        oblivious(a, b, c, n, Span { cols: h, ..s });
        oblivious(a, b, c, n, Span { col: s.col + h, cols: s.cols - h, ..s });
    } else {
        // Both halves accumulate into the same block of C, so they stay sequential.
        let h = s.depth / 2;
        oblivious(a, b, c, n, Span { depth: h, ..s });
        oblivious(a, b, c, n, Span { inner: s.inner + h, depth: s.depth - h, ..s });
    }
}

/// Tiled kernel over the flat buffers with bands of [`TILE`] rows of C processed in
/// parallel on the current rayon pool.
pub fn cache_aware_matmul_1d(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<(), BenchError> {
    let n = check_dims(a, b, c)?;
    if n == 0 {
        return Ok(());
    }
    let (a, b) = (a.as_slice(), b.as_slice());
    c.as_mut_slice()
        .par_chunks_mut(TILE * n)
        .enumerate()
        .for_each(|(band, c_band)| {
            let ii = band * TILE;
            let rows = c_band.len() / n;
            for jj in (0..n).step_by(TILE) {
                let j_end = (jj + TILE).min(n);
                for kk in (0..n).step_by(TILE) {
                    let k_end = (kk + TILE).min(n);
                    for r in 0..rows {
                        let i = ii + r;
                        let c_row = &mut c_band[r * n + jj..r * n + j_end];
                        for k in kk..k_end {
                            axpy(c_row, a[i * n + k], &b[k * n + jj..k * n + j_end]);
                        }
                    }
                }
            }
        });
    Ok(())
}
