use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use workout_summary::{read_package, summarize_package, write_report, OutputFormat, SensorPackage, Training};

/// Benchmarks for package decoding, summary and report rendering

fn bench_read_package(c: &mut Criterion) {
    let mut group = c.benchmark_group("Read Package");

    for package in SensorPackage::sample_packages() {
        group.bench_with_input(
            BenchmarkId::new("read_package", &package.workout_type),
            &package,
            |b, package| {
                b.iter(|| read_package(black_box(&package.workout_type), black_box(&package.data)));
            },
        );
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Summarize");

    for package in SensorPackage::sample_packages() {
        let workout = match read_package(&package.workout_type, &package.data) {
            Ok(workout) => workout,
            Err(e) => panic!("sample package rejected: {}", e),
        };

        group.bench_with_input(
            BenchmarkId::new("summarize", &package.workout_type),
            &workout,
            |b, workout| {
                b.iter(|| black_box(workout).summarize().render());
            },
        );
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("Report");

    for &size in &[3, 30, 300, 3000] {
        let packages = create_package_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &packages, |b, packages| {
            b.iter(|| {
                let mut out = Vec::with_capacity(packages.len() * 128);
                let _ = write_report(packages, OutputFormat::Text, &mut out);
                out
            });
        });
        group.bench_with_input(BenchmarkId::new("json", size), &packages, |b, packages| {
            b.iter(|| {
                let mut out = Vec::with_capacity(packages.len() * 128);
                let _ = write_report(packages, OutputFormat::Json, &mut out);
                out
            });
        });
        group.bench_with_input(BenchmarkId::new("records", size), &packages, |b, packages| {
            b.iter(|| {
                packages
                    .iter()
                    .filter_map(|p| summarize_package(p).ok())
                    .count()
            });
        });
    }

    group.finish();
}

fn create_package_dataset(count: usize) -> Vec<SensorPackage> {
    (0..count)
        .map(|i| {
            let steps = 1000.0 + (i % 100) as f64 * 150.0;
            match i % 3 {
                0 => SensorPackage::new("SWM", vec![steps, 1.0, 80.0, 25.0, 40.0]),
                1 => SensorPackage::new("RUN", vec![steps, 1.0, 75.0]),
                _ => SensorPackage::new("WLK", vec![steps, 1.0, 75.0, 180.0]),
            }
        })
        .collect()
}

criterion_group!(benches, bench_read_package, bench_summarize, bench_report);

criterion_main!(benches);
