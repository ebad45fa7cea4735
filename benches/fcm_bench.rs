use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_regions::{evaluate_labels, project2d, standardize, FuzzyCMeans};
use ndarray::Array2;
use rand::prelude::*;

/// Regions drawn around `n_profiles` random profile centres, already standardized
fn generate_indicator_data(n_regions: usize, n_indicators: usize, n_profiles: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    let centres: Vec<Vec<f64>> = (0..n_profiles)
        .map(|_| (0..n_indicators).map(|_| rng.gen_range(0.0..100.0)).collect())
        .collect();

    let mut data = Vec::with_capacity(n_regions * n_indicators);
    for i in 0..n_regions {
        let centre = &centres[i % n_profiles];
        for &value in centre {
            data.push(value + rng.gen_range(-5.0..5.0));
        }
    }

    let raw = Array2::from_shape_vec((n_regions, n_indicators), data).unwrap();
    standardize(raw.view()).unwrap()
}

fn bench_fcm_cluster_counts(c: &mut Criterion) {
    let data = generate_indicator_data(100, 6, 4);

    let mut group = c.benchmark_group("fcm_cluster_counts");

    for &n_clusters in &[2, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(n_clusters), &n_clusters, |b, &k| {
            let fcm = FuzzyCMeans::new(k).random_state(42);

            b.iter(|| black_box(fcm.fit(black_box(data.view())).unwrap()));
        });
    }

    group.finish();
}

fn bench_n_init_effect(c: &mut Criterion) {
    let data = generate_indicator_data(300, 6, 5);

    let mut group = c.benchmark_group("n_init_effect");

    for &n_init in &[1, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(n_init), &n_init, |b, &n_init| {
            let fcm = FuzzyCMeans::new(5).random_state(42).n_init(n_init);

            b.iter(|| black_box(fcm.fit(black_box(data.view())).unwrap()));
        });
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    group.sample_size(20);

    for &n_regions in &[50, 200, 800] {
        let data = generate_indicator_data(n_regions, 6, 4);
        let labels = FuzzyCMeans::new(4).random_state(42).fit_predict(data.view()).unwrap();

        group.bench_with_input(BenchmarkId::new("all_metrics", n_regions), &data, |b, data| {
            b.iter(|| black_box(evaluate_labels(black_box(data.view()), labels.view(), 4)));
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let data = generate_indicator_data(500, 12, 5);

    c.bench_function("project2d", |b| {
        b.iter(|| black_box(project2d(black_box(data.view())).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_fcm_cluster_counts,
    bench_n_init_effect,
    bench_evaluation,
    bench_projection
);
criterion_main!(benches);
