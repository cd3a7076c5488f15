//! The session: all state owned on the consuming side of the acquisition
//!
//! A `Session` is the only writer of the current settings, the current time
//! axis and the retained histogram. Settings and axis change only through
//! [`Session::apply`]; the retained histogram only through
//! [`Session::on_histogram`]. Every failing call leaves all three untouched.
//!
//! The retained histogram is published as one `Arc<Trimmed>` behind a lock,
//! swapped whole, so a [`Latest`] handle on another thread always reads a
//! complete `(times, counts)` pair.

use crate::cfg::{self, AcquisitionSettings, RawSettings};
use crate::dev::Device;
use crate::hist::{self, Axis, Trimmed};
use crate::res::Catalog;
use crate::{ser, CountEvent, Error, HistogramEvent, Mode, Result, BINS};
use parking_lot::{Mutex, RwLock};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[allow(unused_imports)]
use tracing::{debug, info, warn};

/// Read handle on the most recent trimmed histogram
#[derive(Clone, Default)]
pub struct Latest {
    slot: Arc<RwLock<Option<Arc<Trimmed>>>>,
}

impl Latest {
    pub fn get(&self) -> Option<Arc<Trimmed>> {
        self.slot.read().clone()
    }

    fn set(&self, t: Arc<Trimmed>) {
        *self.slot.write() = Some(t);
    }

    /// Write the most recent trimmed histogram to `path`, returning the
    /// number of rows written. Works mid-acquisition: whatever was latest
    /// when the call started is what gets written.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<usize> {
        let t = self.get().ok_or(Error::NothingToExport)?;
        let mut wtr = BufWriter::new(File::create(path.as_ref())?);
        ser::histogram(&mut wtr, &t)?;
        wtr.flush()?;
        info!(path = %path.as_ref().display(), rows = t.len(), "histogram exported");
        Ok(t.len())
    }
}

pub struct Session<D: Device> {
    device: Arc<Mutex<D>>,
    catalog: Catalog,
    settings: Option<AcquisitionSettings>,
    axis: Arc<Axis>,
    latest: Latest,
    active: Arc<AtomicBool>,
    rates: Option<CountEvent>,
}

impl<D: Device> Session<D> {
    /// Start a session in counting mode, with the axis for whatever
    /// resolution the device is at now. Nothing is pushed to the device.
    ///
    /// Fails if the device's base resolution has no usable catalog.
    pub fn new(device: Arc<Mutex<D>>) -> Result<Self> {
        let (base, resolution) = {
            let d = device.lock();
            (d.base_resolution(), d.resolution())
        };
        let catalog = Catalog::new(base)?;
        debug!(base, resolution, "session started");
        Ok(Session {
            device,
            catalog,
            settings: None,
            axis: Arc::new(hist::axis(resolution, BINS)),
            latest: Latest::default(),
            active: Arc::new(AtomicBool::new(false)),
            rates: None,
        })
    }

    /// Validate, translate and push settings to the device.
    ///
    /// On success the pushed settings replace the current ones, and the axis
    /// is rebuilt if the device now runs at a different resolution.
    pub fn apply(&mut self, raw: &RawSettings) -> Result<AcquisitionSettings> {
        let settings = match cfg::translate(raw, self.catalog.base(), self.is_active()) {
            Ok(s) => s,
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        };
        self.push(settings)
    }

    /// Push the baseline settings, through the same checks as [`Session::apply`]
    pub fn apply_defaults(&mut self) -> Result<AcquisitionSettings> {
        let raw = RawSettings::defaults(self.catalog.base());
        self.apply(&raw)
    }

    fn push(&mut self, settings: AcquisitionSettings) -> Result<AcquisitionSettings> {
        let resolution = {
            let mut d = self.device.lock();
            d.update_settings(&settings).map_err(|e| {
                warn!("device rejected settings: {:#}", e);
                Error::Device(e)
            })?;
            d.resolution()
        };
        info!(?settings, resolution, "settings pushed");
        self.settings = Some(settings);
        if resolution != self.axis.resolution() {
            debug!(old = self.axis.resolution(), new = resolution, "rebuilding axis");
            self.axis = Arc::new(hist::axis(resolution, BINS));
        }
        Ok(settings)
    }

    /// Trim a histogram from the worker and retain it for plotting and export.
    ///
    /// On `EmptyHistogram` (or any other error) the previously retained
    /// histogram stays in place.
    pub fn on_histogram(&mut self, ev: &HistogramEvent) -> Result<Arc<Trimmed>> {
        if ev.resolution != self.axis.resolution() {
            return Err(Error::StaleHistogram {
                captured: ev.resolution,
                current: self.axis.resolution(),
            });
        }
        let t = Arc::new(hist::trim(&ev.buffer, &self.axis)?);
        self.latest.set(t.clone());
        Ok(t)
    }

    pub fn on_counts(&mut self, ev: CountEvent) {
        self.rates = Some(ev);
    }

    /// Switch between counting and histogramming, returning the new mode
    pub fn start_stop(&mut self) -> Mode {
        let was_active = self.active.fetch_xor(true, Ordering::SeqCst);
        let mode = if was_active { Mode::Counting } else { Mode::Histogramming };
        info!(%mode, "mode switched");
        mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.active.store(mode == Mode::Histogramming, Ordering::SeqCst);
    }

    pub fn mode(&self) -> Mode {
        match self.is_active() {
            true => Mode::Histogramming,
            false => Mode::Counting,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// The flag the acquisition worker polls to pick its mode
    pub fn active_flag(&self) -> Arc<AtomicBool> {
        self.active.clone()
    }

    pub fn latest(&self) -> Latest {
        self.latest.clone()
    }

    pub fn export(&self, path: impl AsRef<Path>) -> Result<usize> {
        self.latest.export(path)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolutions(&self) -> &[u32] {
        self.catalog.options()
    }

    pub fn settings(&self) -> Option<&AcquisitionSettings> {
        self.settings.as_ref()
    }

    pub fn axis(&self) -> Arc<Axis> {
        self.axis.clone()
    }

    pub fn rates(&self) -> Option<CountEvent> {
        self.rates
    }

    pub fn device(&self) -> Arc<Mutex<D>> {
        self.device.clone()
    }
}
