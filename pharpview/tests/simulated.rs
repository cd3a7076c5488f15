use parking_lot::Mutex;
use pharptools::cfg::RawSettings;
use pharptools::dev::{Acquire, Device};
use pharptools::session::Session;
use pharptools::{HistogramEvent, Mode};
use pharpview::sim::SimDevice;
use std::sync::Arc;

fn readout(device: &Arc<Mutex<SimDevice>>) -> HistogramEvent {
    let mut d = device.lock();
    HistogramEvent {
        buffer: d.histogram().unwrap().into(),
        resolution: d.resolution(),
    }
}

#[test]
fn trims_to_sync_period() {
    // 10 MHz sync, 100 ns period
    let device = Arc::new(Mutex::new(SimDevice::seeded(4, 10e6, 11)));
    let mut s = Session::new(device.clone()).unwrap();
    let raw = RawSettings { resolution: 16, ..RawSettings::defaults(4) };
    s.apply(&raw).unwrap();
    s.set_mode(Mode::Histogramming);

    let t = s.on_histogram(&readout(&device)).unwrap();
    // 100 ns / 16 ps = 6250 bins at most
    assert!(t.len() <= 6250);
    assert!(t.len() > 6000);
    assert!(t.span() < 100e-9);
    assert_eq!(16, t.resolution);
}

#[test]
fn export_while_histogramming() {
    let device = Arc::new(Mutex::new(SimDevice::seeded(4, 20e6, 5)));
    let mut s = Session::new(device.clone()).unwrap();
    s.apply_defaults().unwrap();
    s.set_mode(Mode::Histogramming);
    let t = s.on_histogram(&readout(&device)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save_filename.csv");
    assert_eq!(t.len(), s.export(&path).unwrap());

    let text = std::fs::read_to_string(&path).unwrap();
    let rows: Vec<(f64, u32)> = text
        .lines()
        .map(|l| {
            let mut cols = l.split(", ");
            let x = cols.next().unwrap().parse().unwrap();
            let y = cols.next().unwrap().parse().unwrap();
            assert_eq!(None, cols.next());
            (x, y)
        })
        .collect();
    assert_eq!(t.len(), rows.len());
    assert_eq!(t.times[..], rows.iter().map(|r| r.0).collect::<Vec<_>>()[..]);
    assert_eq!(t.counts[..], rows.iter().map(|r| r.1).collect::<Vec<_>>()[..]);
}
