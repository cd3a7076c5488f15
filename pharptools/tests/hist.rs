use pharptools::hist::{axis, trim};
use pharptools::{Error, BINS};

mod common;

#[test]
fn axis_covers_all_bins() {
    let a = axis(4, BINS);
    assert_eq!(BINS, a.len());
    assert_eq!(4, a.resolution());
    assert_eq!(0.0, a.times()[0]);
    assert_eq!(4e-12, a.times()[1]);
    assert!(a.times().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn trim_to_last_nonzero() {
    let buf = common::buffer_with(&[(0, 5), (999, 1)]);
    let a = axis(16, BINS);
    let t = trim(&buf, &a).unwrap();
    assert_eq!(1000, t.len());
    assert_eq!(1000, t.times.len());
    assert_eq!(5, t.counts[0]);
    assert_eq!(1, t.counts[999]);
    assert_eq!(a.times()[999], t.span());
    assert_eq!(5, t.max_count());
}

#[test]
fn last_bin_full_keeps_everything() {
    let buf = common::buffer_with(&[(BINS - 1, 3)]);
    let t = trim(&buf, &axis(4, BINS)).unwrap();
    assert_eq!(BINS, t.len());
}

#[test]
fn all_zero_is_empty() {
    let buf = vec![0u32; BINS];
    assert!(matches!(trim(&buf, &axis(4, BINS)), Err(Error::EmptyHistogram)));
}
