//! PRPD and waveform feature benchmarks
//!
//! Run with: cargo bench --package feature-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feature_engine::{PrpdFeatures, WaveformFeatures};
use plot_extraction::{PrpdPoint, WaveformPoint};

/// Two discharge lobes in opposite half cycles plus a uniform noise floor
fn prpd_cloud(n: usize) -> Vec<PrpdPoint> {
    (0..n)
        .map(|i| {
            let jitter = ((i * 37) % 100) as f64 / 10.0;
            match i % 3 {
                0 => PrpdPoint {
                    phase_deg: 45.0 + jitter,
                    intensity_db: 30.0 + jitter,
                },
                1 => PrpdPoint {
                    phase_deg: 225.0 + jitter,
                    intensity_db: 28.0 + jitter,
                },
                _ => PrpdPoint {
                    phase_deg: (i * 7 % 360) as f64,
                    intensity_db: 5.0 + jitter * 0.5,
                },
            }
        })
        .collect()
}

fn damped_pulse(n: usize) -> Vec<WaveformPoint> {
    (0..n)
        .map(|i| {
            let t = -5.0 + 11.0 * i as f64 / n as f64;
            WaveformPoint {
                time_us: t,
                amplitude_db: 20.0 * (-t.abs()).exp() * (6.0 * t).cos(),
            }
        })
        .collect()
}

fn bench_prpd(c: &mut Criterion) {
    let mut group = c.benchmark_group("PRPD features");

    for &n in &[100usize, 1_000, 10_000] {
        let cloud = prpd_cloud(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &cloud, |b, cloud| {
            b.iter(|| PrpdFeatures::compute(black_box(cloud)));
        });
    }

    group.finish();
}

fn bench_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Waveform features");

    for &n in &[500usize, 5_000] {
        let trace = damped_pulse(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &trace, |b, trace| {
            b.iter(|| WaveformFeatures::compute(black_box(trace)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prpd, bench_waveform);
criterion_main!(benches);
