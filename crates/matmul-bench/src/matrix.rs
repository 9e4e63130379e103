// File: crates/matmul-bench/src/matrix.rs
// Summary: Square row-major i32 matrix.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    data: Vec<i32>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self::filled(n, 0)
    }

    pub fn filled(n: usize, value: i32) -> Self {
        Self { n, data: vec![value; n * n] }
    }

    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> i32) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self { n, data }
    }

    /// Side length N.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.data
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [i32] {
        &mut self.data[i * self.n..(i + 1) * self.n]
    }

    /// Reset every element to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i32;

    fn index(&self, (i, j): (usize, usize)) -> &i32 {
        &self.data[i * self.n + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut i32 {
        &mut self.data[i * self.n + j]
    }
}
