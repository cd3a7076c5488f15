use crate::app::Event;
use parking_lot::Mutex;
use pharptools::dev::Acquire;
use pharptools::{CountEvent, HistogramEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Poll the instrument once per acquisition time, sending count rates while
/// counting and the full histogram while `active` is set.
///
/// The resolution is read under the same lock as the histogram, so each
/// buffer is tagged with the bin width it was actually captured at.
pub fn main<D, I>(
    device: Arc<Mutex<D>>,
    active: Arc<AtomicBool>,
    sender: flume::Sender<Event<I>>,
) -> anyhow::Result<()>
where
    D: Acquire + 'static,
    I: Send + 'static,
{
    std::thread::spawn(move || loop {
        let period = device.lock().acq_time();
        std::thread::sleep(period);

        let msg = if active.load(Ordering::SeqCst) {
            let mut d = device.lock();
            let resolution = d.resolution();
            d.histogram().map(|buffer| {
                Event::Histogram(HistogramEvent {
                    buffer: buffer.into(),
                    resolution,
                })
            })
        } else {
            device
                .lock()
                .count_rates()
                .map(|(ch0, ch1)| Event::Counts(CountEvent { ch0, ch1 }))
        };
        let msg = msg.unwrap_or_else(|e| {
            warn!("readout failed: {:#}", e);
            Event::Fault(e)
        });
        if sender.send(msg).is_err() {
            debug!("event receiver gone, worker stopping");
            break;
        }
    });
    Ok(())
}
