use criterion::{black_box, criterion_group, criterion_main, Criterion};
use omron_fins::{Address, FinsHeader, MemoryArea, NodeAddress};

fn bench_address_parse(c: &mut Criterion) {
    c.bench_function("address_parse_word", |b| {
        b.iter(|| Address::parse(black_box("D100")).unwrap())
    });
    c.bench_function("address_parse_bit", |b| {
        b.iter(|| Address::parse(black_box("CIO0.05")).unwrap())
    });
}

fn bench_address_display(c: &mut Criterion) {
    let addr = Address::word(MemoryArea::DM, 100);
    c.bench_function("address_display", |b| {
        b.iter(|| black_box(addr).to_string())
    });
}

fn bench_header_roundtrip(c: &mut Criterion) {
    let dest = NodeAddress::new(0, 10, 0).unwrap();
    let src = NodeAddress::new(0, 1, 0).unwrap();
    c.bench_function("header_to_bytes", |b| {
        b.iter(|| FinsHeader::new_command(dest, src, 0x01, 0x0101).to_bytes())
    });
    let bytes = FinsHeader::new_command(dest, src, 0x01, 0x0101).to_bytes();
    c.bench_function("header_from_bytes", |b| {
        b.iter(|| FinsHeader::from_bytes(black_box(&bytes)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_address_parse,
    bench_address_display,
    bench_header_roundtrip
);
criterion_main!(benches);
