//! The instrument as seen from the settings and acquisition sides

use crate::cfg::AcquisitionSettings;
use anyhow::Result;
use std::time::Duration;

/// Settings side of the instrument
pub trait Device: Send {
    /// Native bin width (ps), fixed for the life of the device
    fn base_resolution(&self) -> u32;

    /// Program a full parameter set
    fn update_settings(&mut self, settings: &AcquisitionSettings) -> Result<()>;

    /// Bin width (ps) the device is currently running at
    fn resolution(&self) -> u32;
}

/// Acquisition side of the instrument, polled by the worker
pub trait Acquire: Device {
    /// Current rates (counts/s) on both inputs
    fn count_rates(&mut self) -> Result<(f64, f64)>;

    /// The full histogram accumulated so far
    fn histogram(&mut self) -> Result<Vec<u32>>;

    /// Programmed acquisition time per readout
    fn acq_time(&self) -> Duration;
}
