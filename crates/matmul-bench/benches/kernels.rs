// File: crates/matmul-bench/benches/kernels.rs
// Summary: Criterion timings of the four matmul kernels at two sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};
use matmul_bench::{cache_aware_matmul, cache_aware_matmul_1d, cache_oblivious_matmul, naive_matmul, CacheInfo, Matrix};

fn bench_kernels(c: &mut Criterion) {
    let l1 = CacheInfo::detect().l1_size;
    let mut group = c.benchmark_group("matmul");
    group.sample_size(10);
    for &n in &[64usize, 256] {
        let a = Matrix::filled(n, 1);
        let b = Matrix::filled(n, 1);
        let mut out = Matrix::zeros(n);

        group.bench_with_input(BenchmarkId::new("naive", n), &n, |bch, _| {
            bch.iter(|| { out.clear(); naive_matmul(black_box(&a), black_box(&b), &mut out).unwrap() })
        });
        group.bench_with_input(BenchmarkId::new("cache_aware", n), &n, |bch, _| {
            bch.iter(|| { out.clear(); cache_aware_matmul(black_box(&a), black_box(&b), &mut out, l1).unwrap() })
        });
        group.bench_with_input(BenchmarkId::new("cache_oblivious", n), &n, |bch, _| {
            bch.iter(|| { out.clear(); cache_oblivious_matmul(black_box(&a), black_box(&b), &mut out).unwrap() })
        });
        group.bench_with_input(BenchmarkId::new("cache_aware_1d", n), &n, |bch, _| {
            bch.iter(|| { out.clear(); cache_aware_matmul_1d(black_box(&a), black_box(&b), &mut out).unwrap() })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
