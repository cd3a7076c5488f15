#[allow(unused_imports)]
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pharptools::{hist, BINS};

fn axis(c: &mut Criterion) {
    c.bench_function("axis", |b| { b.iter( || {
        hist::axis(black_box(4), BINS);
    })});
}

fn trim(c: &mut Criterion) {
    let axis = hist::axis(4, BINS);
    // 20 MHz sync at 4 ps fills the first 12500 bins
    let mut buffer = vec![0u32; BINS];
    for (i, b) in buffer.iter_mut().take(12_500).enumerate() {
        *b = (i % 97) as u32 + 1;
    }

    c.bench_function("trim", |b| { b.iter( || {
        hist::trim(black_box(&buffer), &axis).unwrap();
    })});
}

criterion_group!(benches, axis, trim);
criterion_main!(benches);
