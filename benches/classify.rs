//! Benchmark for per-record classification throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use storage_facts::capacity::format::PlainBinaryFormatter;
use storage_facts::{Classifier, RawRecord};

fn sample_records() -> Vec<RawRecord> {
    serde_json::from_value(serde_json::json!([
        {
            "mount": "/",
            "source": "/dev/sda1",
            "driver": "ext4",
            "options": ["rw", "relatime", "errors=remount-ro"],
            "dump": 0,
            "pass": 1,
        },
        {"mount": "/proc", "source": "proc"},
        {"mount": "/tmp", "source": "tmpfs", "driver": "tmpfs"},
        {"mount": "none", "driver": "swap"},
        {"mount": "/mnt/remote", "driver": "fuse", "options": ["subtype=sshfs", "rw"]},
        {
            "mount": "/var",
            "driver": "xfs",
            "total": 1000000,
            "used": 421337,
            "block_size": 1024,
        },
    ]))
    .unwrap()
}

fn bench_classify_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(1));

    let classifier = Classifier::new(PlainBinaryFormatter);
    let records = sample_records();

    group.bench_function("classify_single_record", |b| {
        let mut counter = 0usize;
        b.iter(|| {
            counter += 1;
            let record = &records[counter % records.len()];
            let _ = classifier.classify_one(black_box(record));
        });
    });

    group.finish();
}

fn bench_classify_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let classifier = Classifier::new(PlainBinaryFormatter);
    let records = sample_records();
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("classify_batch", |b| {
        b.iter(|| classifier.classify_all(black_box(&records)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_classify_one, bench_classify_all);
criterion_main!(benches);
