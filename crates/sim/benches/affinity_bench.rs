use clonalg_sim::affinity::{AffinityStrategy, EuclideanDistance, HammingSimilarity};
use clonalg_sim::base::{Sequence, SequenceAlphabet};
use clonalg_sim::profile::{ProfileConfig, ProfileModel};
use clonalg_sim::simulation::Antigen;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn random_alignment(rows: usize, cols: usize, rng: &mut Xoshiro256PlusPlus) -> Vec<Sequence> {
    (0..rows)
        .map(|_| Sequence::random(SequenceAlphabet::Dna, cols, rng))
        .collect()
}

fn bench_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    for &cols in &[50, 500] {
        let alignment = random_alignment(100, cols, &mut rng);
        group.throughput(Throughput::Elements((100 * cols) as u64));
        group.bench_with_input(BenchmarkId::new("train", cols), &alignment, |b, alignment| {
            b.iter(|| {
                ProfileModel::train(
                    black_box(alignment),
                    SequenceAlphabet::Dna,
                    ProfileConfig::default(),
                )
            })
        });

        let model =
            ProfileModel::train(&alignment, SequenceAlphabet::Dna, ProfileConfig::default())
                .unwrap();
        let query = Sequence::random(SequenceAlphabet::Dna, cols, &mut rng);
        group.bench_with_input(BenchmarkId::new("score", cols), &query, |b, query| {
            b.iter(|| model.score(black_box(query.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("log_odds", cols), &query, |b, query| {
            b.iter(|| model.log_odds(black_box(query.as_slice())))
        });
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);

    for &len in &[8, 64, 500] {
        let antigen = Antigen::new(
            "bench",
            "",
            Sequence::random(SequenceAlphabet::Dna, len, &mut rng),
        );
        let candidate = Sequence::random(SequenceAlphabet::Dna, len, &mut rng);
        group.throughput(Throughput::Elements(len as u64));

        let hamming = HammingSimilarity;
        group.bench_with_input(BenchmarkId::new("hamming", len), &candidate, |b, cand| {
            b.iter(|| hamming.calculate(black_box(cand.as_slice()), &antigen, 0))
        });

        let euclidean = EuclideanDistance::new(SequenceAlphabet::Dna);
        group.bench_with_input(BenchmarkId::new("euclidean", len), &candidate, |b, cand| {
            b.iter(|| euclidean.calculate(black_box(cand.as_slice()), &antigen, 0))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_profile, bench_strategies);
criterion_main!(benches);
