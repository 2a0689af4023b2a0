//! Throughput benchmark: accesses per second for each policy.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pagesim::policy::PolicyKind;
use pagesim::trace::{AccessPattern, TraceGenerator};

fn bench_policies(c: &mut Criterion) {
    let mut generator = TraceGenerator::new(50_000, 1, 1500, Some(2024)).unwrap();
    let trace = generator.generate(AccessPattern::Mixed);

    let mut group = c.benchmark_group("run_mixed_trace");
    group.throughput(Throughput::Elements(trace.len() as u64));

    for kind in PolicyKind::ALL {
        for frames in [30usize, 150] {
            group.bench_with_input(
                BenchmarkId::new(kind.to_string(), frames),
                &frames,
                |b, &frames| {
                    let mut policy = kind.build(frames).unwrap();
                    b.iter(|| policy.run(&trace));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_policies);
criterion_main!(benches);
