//! Simulated photon counter, for running without hardware
//!
//! Photons arrive as an exponential decay after each sync pulse on top of a
//! flat background. Arrivals are folded into one sync period, so every bin
//! past `period / resolution` stays empty, as on the real instrument.

use anyhow::Result;
use pharptools::cfg::AcquisitionSettings;
use pharptools::dev::{Acquire, Device};
use pharptools::{res, BINS, PS_PER_S};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Decay lifetime (ps)
pub const LIFETIME: f64 = 4_000.0;
/// Detected photon rate on ch1 (counts/s)
pub const PHOTON_RATE: f64 = 1.0e5;
/// Fraction of photons uncorrelated with sync
pub const BACKGROUND: f64 = 0.05;
/// Upper bound on photons generated per readout
const MAX_PHOTONS: usize = 200_000;

pub struct SimDevice {
    base: u32,
    sync_rate: f64,
    settings: AcquisitionSettings,
    resolution: u32,
    hist: Vec<u32>,
    accumulating: bool,
    rng: StdRng,
}

impl SimDevice {
    pub fn new(base: u32, sync_rate: f64) -> Self {
        SimDevice {
            base,
            sync_rate,
            settings: AcquisitionSettings::default(),
            resolution: base,
            hist: vec![0; BINS],
            accumulating: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for repeatable data
    pub fn seeded(base: u32, sync_rate: f64, seed: u64) -> Self {
        SimDevice {
            rng: StdRng::seed_from_u64(seed),
            ..SimDevice::new(base, sync_rate)
        }
    }

    /// Sync period (ps) after the divider
    pub fn period(&self) -> f64 {
        PS_PER_S * self.settings.sync_divider as f64 / self.sync_rate
    }

    fn photons(&self) -> usize {
        let n = PHOTON_RATE * self.settings.acq_time_ms as f64 / 1e3;
        (n as usize).min(MAX_PHOTONS)
    }

    fn arrival(&mut self) -> f64 {
        let period = self.period();
        let offset = self.settings.sync_offset as f64;
        let t = if self.rng.gen::<f64>() < BACKGROUND {
            self.rng.gen::<f64>() * period
        } else {
            // 1 - u keeps ln() away from zero
            -LIFETIME * (1.0 - self.rng.gen::<f64>()).ln()
        };
        (t + offset).rem_euclid(period)
    }
}

impl Device for SimDevice {
    fn base_resolution(&self) -> u32 {
        self.base
    }

    fn update_settings(&mut self, settings: &AcquisitionSettings) -> Result<()> {
        self.resolution = res::binning_to_resolution(settings.binning, self.base)?;
        self.settings = *settings;
        self.hist.iter_mut().for_each(|c| *c = 0);
        Ok(())
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}

impl Acquire for SimDevice {
    fn count_rates(&mut self) -> Result<(f64, f64)> {
        self.accumulating = false;
        let noise = 1.0 + 0.02 * (self.rng.gen::<f64>() - 0.5);
        let sync = self.sync_rate / self.settings.sync_divider as f64;
        Ok((sync, PHOTON_RATE * noise))
    }

    fn histogram(&mut self) -> Result<Vec<u32>> {
        if !self.accumulating {
            self.hist.iter_mut().for_each(|c| *c = 0);
            self.accumulating = true;
        }
        let resolution = self.resolution() as f64;
        for _ in 0..self.photons() {
            let bin = (self.arrival() / resolution) as usize;
            if let Some(c) = self.hist.get_mut(bin) {
                *c = c.saturating_add(1);
            }
        }
        Ok(self.hist.clone())
    }

    fn acq_time(&self) -> Duration {
        Duration::from_millis(self.settings.acq_time_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_past_sync_period_is_empty() {
        // 20 MHz sync: 50 ns period, 12500 bins at 4 ps
        let mut d = SimDevice::seeded(4, 20e6, 7);
        d.update_settings(&AcquisitionSettings::default()).unwrap();
        let h = d.histogram().unwrap();
        assert_eq!(BINS, h.len());
        assert!(h[..12_500].iter().any(|&c| c > 0));
        assert!(h[12_500..].iter().all(|&c| c == 0));
    }

    #[test]
    fn histogram_accumulates_until_counting() {
        let mut d = SimDevice::seeded(4, 20e6, 7);
        let first: u64 = d.histogram().unwrap().iter().map(|&c| c as u64).sum();
        let second: u64 = d.histogram().unwrap().iter().map(|&c| c as u64).sum();
        assert_eq!(2 * first, second);
        d.count_rates().unwrap();
        let third: u64 = d.histogram().unwrap().iter().map(|&c| c as u64).sum();
        assert_eq!(first, third);
    }

    #[test]
    fn binning_changes_resolution() {
        let mut d = SimDevice::seeded(4, 20e6, 7);
        let s = AcquisitionSettings { binning: 3, ..Default::default() };
        d.update_settings(&s).unwrap();
        assert_eq!(32, d.resolution());
        let s = AcquisitionSettings { binning: 8, ..Default::default() };
        assert!(d.update_settings(&s).is_err());
        assert_eq!(32, d.resolution());
    }

    #[test]
    fn divider_scales_sync_rate() {
        let mut d = SimDevice::seeded(4, 20e6, 7);
        let s = AcquisitionSettings { sync_divider: 4, ..Default::default() };
        d.update_settings(&s).unwrap();
        assert_eq!(5e6, d.count_rates().unwrap().0);
        assert_eq!(Duration::from_millis(500), d.acq_time());
    }
}
