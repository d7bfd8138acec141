use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
};
use serde_json::{json, Map, Value};

use transfer_opts::{
    apply_options, Applicator, ApplyMode, HttpTransfer, RecordingHandle,
};

fn options_document(pairs: usize) -> Value {
    let mut document = Map::new();
    for code in 0..pairs {
        let value = match code % 3 {
            0 => json!(code % 2 == 0),
            1 => json!(format!("value-{}", code)),
            _ => json!(code),
        };
        document.insert(code.to_string(), value);
    }
    Value::Object(document)
}

fn apply_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_options");

    for pairs in [10, 100, 1000] {
        let document = options_document(pairs);

        group.bench_with_input(
            BenchmarkId::new("greedy", pairs),
            &document,
            |b, document| {
                b.iter(|| {
                    let mut handle = RecordingHandle::new();
                    apply_options(black_box(document), &mut handle).unwrap();
                    handle
                });
            },
        );

        let applicator = Applicator::new(ApplyMode::ValidateFirst);
        group.bench_with_input(
            BenchmarkId::new("validate_first", pairs),
            &document,
            |b, document| {
                b.iter(|| {
                    let mut handle = RecordingHandle::new();
                    applicator
                        .apply(black_box(document), &mut handle)
                        .unwrap();
                    handle
                });
            },
        );
    }

    let document = json!({
        "10002": "https://example.test/upload",
        "10018": "transfer-opts-bench",
        "10015": "a=1&b=2",
        "52": true,
        "68": 5,
        "13": 30,
    });
    group.bench_function("http_transfer", |b| {
        b.iter(|| {
            let mut transfer = HttpTransfer::new();
            apply_options(black_box(&document), &mut transfer).unwrap();
            transfer
        });
    });

    group.finish();
}

criterion_group!(benches, apply_benchmark);
criterion_main!(benches);
