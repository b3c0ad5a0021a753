use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use particle_encoder::FrontmatterEncoder;
use particle_tests::{GOLDEN_CONTENT, golden_post};
use particle_types::{Encoding, JSON, JsonCodec, TOML, TomlCodec, YAML, YamlCodec};

fn bench_encode_cached(c: &mut Criterion) {
    let post = golden_post();
    let mut group = c.benchmark_group("encode_cached");

    group.bench_function("yaml", |b| {
        b.iter(|| FrontmatterEncoder::new(&YAML).encode(GOLDEN_CONTENT, &post).unwrap());
    });
    group.bench_function("toml", |b| {
        b.iter(|| FrontmatterEncoder::new(&TOML).encode(GOLDEN_CONTENT, &post).unwrap());
    });
    group.bench_function("json", |b| {
        b.iter(|| FrontmatterEncoder::new(&JSON).encode(GOLDEN_CONTENT, &post).unwrap());
    });

    group.finish();
}

fn bench_encode_fresh(c: &mut Criterion) {
    let post = golden_post();
    let mut group = c.benchmark_group("encode_fresh");

    group.bench_function("yaml", |b| {
        b.iter(|| {
            let yaml = Encoding::<YamlCodec>::yaml();
            FrontmatterEncoder::new(&yaml).encode(GOLDEN_CONTENT, &post).unwrap()
        });
    });
    group.bench_function("toml", |b| {
        b.iter(|| {
            let toml = Encoding::<TomlCodec>::toml();
            FrontmatterEncoder::new(&toml).encode(GOLDEN_CONTENT, &post).unwrap()
        });
    });
    group.bench_function("json", |b| {
        b.iter(|| {
            let json = Encoding::<JsonCodec>::json();
            FrontmatterEncoder::new(&json).encode(GOLDEN_CONTENT, &post).unwrap()
        });
    });

    group.finish();
}

fn bench_encode_throughput(c: &mut Criterion) {
    let post = golden_post();
    let mut group = c.benchmark_group("encode_throughput");

    for size_kb in [1, 64, 1024] {
        let content = vec![b'x'; size_kb * 1024];
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("yaml", format!("{size_kb}kb")),
            &content,
            |b, body| b.iter(|| FrontmatterEncoder::new(&YAML).encode(body, &post).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_cached,
    bench_encode_fresh,
    bench_encode_throughput
);
criterion_main!(benches);
