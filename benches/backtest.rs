//! Benchmarks for feature construction, OLS fitting and the full backtest.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nowcast_backtest::backtest::ExpandingWindow;
use nowcast_backtest::core::{add_months, Panel, PanelRow};
use nowcast_backtest::features::build_features;
use nowcast_backtest::utils::ols_fit;

fn generate_panel(n: u32) -> Panel {
    let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            PanelRow::new(
                add_months(start, i).unwrap(),
                5.0 + (t * 0.13).sin() + 0.4 * (t * 0.71).cos(),
                1.0e6 * (2.0 + (2.0 * std::f64::consts::PI * t / 12.0).sin()) + 500.0 * t,
            )
        })
        .collect()
}

fn bench_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_features");

    for size in [120u32, 240, 480].iter() {
        let panel = generate_panel(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| build_features(black_box(&panel)))
        });
    }

    group.finish();
}

fn bench_ols(c: &mut Criterion) {
    let mut group = c.benchmark_group("ols_fit");

    for size in [60usize, 240, 960].iter() {
        let x1: Vec<f64> = (0..*size).map(|i| (i as f64 * 0.3).sin()).collect();
        let x2: Vec<f64> = (0..*size).map(|i| (i as f64 * 0.7).cos()).collect();
        let y: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .enumerate()
            .map(|(i, (a, b))| 1.0 + 2.0 * a - b + 0.01 * (i % 7) as f64)
            .collect();
        let columns = vec![x1, x2];

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| ols_fit(black_box(&y), black_box(&columns)))
        });
    }

    group.finish();
}

fn bench_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("expanding_window");
    group.sample_size(20);

    for size in [120u32, 240, 480].iter() {
        let frame = build_features(&generate_panel(*size)).unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            let window = ExpandingWindow::new(60);
            b.iter(|| window.evaluate(black_box(&frame)))
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            let window = ExpandingWindow::new(60).with_parallel(true);
            b.iter(|| window.evaluate(black_box(&frame)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_features, bench_ols, bench_backtest);
criterion_main!(benches);
