//! Criterion benchmarks for document encode/decode throughput.
//!
//! Run with:
//!   cargo bench --bench codec
//!
//! Set BSON_BENCH_ARRAY_LEN to change the size of the large-array fixture
//! (defaults to 10,000 entries) the way the teacher's block benchmarks
//! accept SILESIA_CORPUS_DIR to swap in real-world data.

use bson::registry::{DecodeOptions, NoopRegistry};
use bson::{Bson, Buffer, Document};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

fn flat_document() -> Document {
    let mut doc = Document::new();
    doc.insert("_id", 1i32);
    doc.insert("name", "widget");
    doc.insert("price", 19.99);
    doc.insert("in_stock", true);
    doc.insert("quantity", 42i32);
    doc
}

fn nested_document() -> Document {
    let mut address = Document::new();
    address.insert("street", "123 Example Ave");
    address.insert("city", "Springfield");
    address.insert("zip", "00000");

    let mut doc = Document::new();
    doc.insert("_id", 2i32);
    doc.insert("name", "customer");
    doc.insert("address", address);
    doc.insert("active", true);
    doc
}

fn large_array_document() -> Document {
    let len: usize = std::env::var("BSON_BENCH_ARRAY_LEN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000);
    let values: Vec<Bson> = (0..len as i64).map(Bson::from_i64).collect();
    let mut doc = Document::new();
    doc.insert("_id", 3i32);
    doc.insert("values", values);
    doc
}

fn bench_document_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_encode_decode");

    for (label, doc) in [
        ("flat", flat_document()),
        ("nested", nested_document()),
        ("large_array", large_array_document()),
    ] {
        let mut buf = Buffer::new();
        buf.put_hash(&doc, true).unwrap();
        let encoded = buf.to_bytes();
        group.throughput(Throughput::Bytes(encoded.len() as u64));

        group.bench_function(format!("encode_{label}"), |b| {
            b.iter(|| {
                let mut buf = Buffer::new();
                buf.put_hash(&doc, true).unwrap();
                buf
            })
        });

        group.bench_function(format!("decode_{label}"), |b| {
            b.iter(|| {
                let mut reader = Buffer::from_bytes(&encoded);
                reader.get_document(&NoopRegistry, &DecodeOptions::default()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_document_encode_decode);
criterion_main!(benches);
