use bitrank::{BitVector, testutil::BitGen};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::hint::black_box;

const SIZES: [usize; 4] = [4096, 65536, 1 << 20, 1 << 24];

fn queries(rng: &mut impl Rng, len: usize, n: usize) -> Vec<isize> {
    (0..n).map(|_| rng.random_range(0..len) as isize).collect()
}

fn benchmark_rank(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut bit_gen = BitGen::new(42);
    let mut group = c.benchmark_group("rank");

    for len in SIZES {
        let bv = bit_gen.density(len, 50);
        let qs = queries(&mut rng, len, 1024);

        group.bench_function(BenchmarkId::new("rank", len), |b| {
            b.iter(|| {
                for &q in &qs {
                    black_box(bv.rank(q).ok());
                }
            })
        });

        // linear popcount baseline
        let bits = bv.as_bitslice();
        group.bench_function(BenchmarkId::new("bitvec_count_ones", len), |b| {
            b.iter(|| {
                for &q in qs.iter().take(16) {
                    black_box(bits[..=q as usize].count_ones());
                }
            })
        });
    }

    group.finish();
}

fn benchmark_select(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut bit_gen = BitGen::new(42);
    let mut group = c.benchmark_group("select");

    for len in SIZES {
        let bv = bit_gen.density(len, 10);
        let ones = bv.count_ones();
        let ks: Vec<usize> = (0..1024).map(|_| rng.random_range(0..ones)).collect();

        group.bench_function(BenchmarkId::new("select1", len), |b| {
            b.iter(|| {
                for &k in &ks {
                    black_box(bv.select1(k));
                }
            })
        });
        group.bench_function(BenchmarkId::new("select0", len), |b| {
            b.iter(|| {
                for &k in &ks {
                    black_box(bv.select0(k));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_mutation(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut group = c.benchmark_group("mutation");

    for len in SIZES {
        let qs = queries(&mut rng, len, 256);

        group.bench_function(BenchmarkId::new("flip", len), |b| {
            b.iter_batched_ref(
                || BitVector::new(len),
                |bv| {
                    for &q in &qs {
                        black_box(bv.flip(q).ok());
                    }
                },
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_function(BenchmarkId::new("set_range", len), |b| {
            b.iter_batched_ref(
                || BitVector::new(len),
                |bv| black_box(bv.set_range(len / 4..len / 2).ok()),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_rank,
    benchmark_select,
    benchmark_mutation
);
criterion_main!(benches);
