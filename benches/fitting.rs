use criterion::{criterion_group, criterion_main, Criterion};
use polyreg::{bayes::fit_predict, synthetic::noisy_sine, value::Linspace, BayesianFit, LeastSquaresFit};
use std::hint::black_box;

fn gen_sample_data(n: f64) -> Vec<(f64, f64)> {
    noisy_sine(n as usize, 0.3, 523_456_789).expect("Failed to generate data")
}

fn fit(data: &[(f64, f64)], degree: usize) -> LeastSquaresFit<'_, f64> {
    LeastSquaresFit::new(data, degree).expect("Failed to fit data")
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the solver scales with data size
    println!("Benchmarking least squares vs n (Degree=3)...");
    test_linear_criterion_group(
        c,
        "fit_vs_n",
        &[
            CriterionTestEntry::new("n=100", 1e2, gen_sample_data(1e2)),
            CriterionTestEntry::new("n=1_000", 1e3, gen_sample_data(1e3)),
            CriterionTestEntry::new("n=10_000", 1e4, gen_sample_data(1e4)),
            CriterionTestEntry::new("n=100_000", 1e5, gen_sample_data(1e5)),
        ],
        |b, data| b.iter(|| fit(black_box(data), 3)),
    );

    //
    // Now the same but scaling with degree
    println!("Benchmarking least squares vs degree (n=1000)...");
    let samples = gen_sample_data(1e3);
    let mut group = c.benchmark_group("fit_vs_degree");
    for degree in [1, 3, 5, 9, 15] {
        group.bench_function(format!("Degree={degree}"), |b| {
            b.iter(|| fit(black_box(&samples), degree))
        });
    }
    group.finish();

    //
    // Ridge and Bayesian fits for the same data
    println!("Benchmarking regularized fits (Degree=9, n=1000)...");
    let mut group = c.benchmark_group("fit_vs_method");
    group.bench_function("Ordinary", |b| b.iter(|| fit(black_box(&samples), 9)));
    group.bench_function("Ridge", |b| {
        b.iter(|| LeastSquaresFit::new_regularized(black_box(&samples[..]), 9, 1e-3))
    });
    group.bench_function("Bayesian", |b| {
        b.iter(|| BayesianFit::new(black_box(&samples), 5e-3, 11.1, 9))
    });
    group.finish();

    //
    // Predictive queries scale with the number of points, not the training set
    println!("Benchmarking Bayesian prediction vs query count (Degree=9, n=10)...");
    let train = gen_sample_data(10.0);
    let posterior = BayesianFit::new(&train, 5e-3, 11.1, 9).expect("Failed to fit data");
    test_linear_criterion_group(
        c,
        "predict_vs_queries",
        &[
            CriterionTestEntry::new("q=100", 1e2, 100),
            CriterionTestEntry::new("q=1_000", 1e3, 1_000),
            CriterionTestEntry::new("q=10_000", 1e4, 10_000),
        ],
        |b, &n| b.iter(|| posterior.predict_many(Linspace::new(0.0, 1.0, black_box(n)))),
    );

    let (x, t): (Vec<f64>, Vec<f64>) = train.iter().copied().unzip();
    let query: Vec<f64> = Linspace::new(0.0, 1.0, 301).collect();
    c.bench_function("fit_predict_301", |b| {
        b.iter(|| fit_predict(black_box(&query), &x, &t, 5e-3, 11.1, 9))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn get_data_for_run<V>(group_id: &str, tests: &[CriterionTestEntry<V>]) -> Vec<(f64, f64)> {
    // Each test corresponds to a different x value in the series
    tests
        .iter()
        .map(|test| {
            let y = get_sample_for_run(group_id, &test.id);
            (test.x, y)
        })
        .collect()
}

fn get_sample_for_run(group_id: &str, test_id: &str) -> f64 {
    #[derive(serde::Deserialize)]
    struct CriterionSamples {
        iters: Vec<f64>,
        times: Vec<f64>,
    }

    let raw = std::fs::read_to_string(format!(
        "target/criterion/{group_id}/{test_id}/new/sample.json"
    ))
    .expect("Failed to read sample data");
    let samples: CriterionSamples =
        serde_json::from_str(&raw).expect("Failed to parse sample data");

    samples
        .iters
        .iter()
        .zip(samples.times.iter())
        .map(|(i, t)| t / i)
        .sum::<f64>()
        / (samples.iters.len() as f64)
}

struct CriterionTestEntry<V> {
    id: String,
    x: f64,
    values: V,
}
impl<V> CriterionTestEntry<V> {
    pub fn new(id: &str, x: f64, values: V) -> Self {
        Self {
            id: id.to_string(),
            x,
            values,
        }
    }
}

fn test_linear_criterion_group<F, V>(
    c: &mut Criterion,
    id: &str,
    samples: &[CriterionTestEntry<V>],
    runner: F,
) where
    for<'a, 'b, 'c> F: Fn(&'a mut criterion::Bencher<'b>, &'c V),
{
    let mut group = c.benchmark_group(id);
    for sample in samples {
        group.bench_with_input(&sample.id, &sample.values, &runner);
    }
    group.finish();

    //
    // Time per iteration should grow linearly in the measured quantity
    let data = get_data_for_run(id, samples);
    let linear_fit = fit(&data, 1);
    println!("{id}: {linear_fit} (R² = {:.4})", linear_fit.r_squared());
}
