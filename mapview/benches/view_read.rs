use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mapview::{AccessMode, MappedFile, OpenMode};

fn bench_read_into(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let capacity = 16 * 1024 * 1024;
    let file = MappedFile::open(
        dir.path().join("bench.bin"),
        OpenMode::CreateNew,
        None,
        capacity,
        AccessMode::ReadWrite,
    )
    .unwrap();

    let mut writer = file.create_view(0, 0, AccessMode::Write).unwrap();
    let fill: Vec<u64> = (0..capacity / 8).collect();
    writer.write_from(0, &fill, 0, fill.len()).unwrap();
    writer.dispose();

    let view = file.create_view(0, 0, AccessMode::Read).unwrap();
    let mut group = c.benchmark_group("read_into");

    for elements in [64usize, 4096, 262_144] {
        let mut buffer = vec![0u64; elements];
        group.throughput(Throughput::Bytes((elements * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(elements), &elements, |b, &n| {
            b.iter(|| {
                view.read_into(black_box(8), &mut buffer, 0, n).unwrap();
                black_box(&buffer);
            })
        });
    }
    group.finish();
}

fn bench_create_view(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let file = MappedFile::open(
        dir.path().join("views.bin"),
        OpenMode::CreateNew,
        None,
        0,
        AccessMode::ReadWrite,
    )
    .unwrap();

    c.bench_function("create_and_dispose_view", |b| {
        b.iter(|| {
            let mut view = file.create_view(black_box(128), 256, AccessMode::Read).unwrap();
            view.dispose();
        })
    });
}

criterion_group!(benches, bench_read_into, bench_create_view);
criterion_main!(benches);
