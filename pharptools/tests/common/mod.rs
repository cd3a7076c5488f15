#![allow(dead_code)]

use anyhow::{bail, Result};
use pharptools::cfg::AcquisitionSettings;
use pharptools::dev::Device;
use pharptools::{res, BINS};

/// Stand-in instrument that records every settings push
pub struct MockDevice {
    pub base: u32,
    pub current: AcquisitionSettings,
    pub resolution: u32,
    pub pushes: Vec<AcquisitionSettings>,
    pub fail: bool,
}

impl MockDevice {
    pub fn new(base: u32) -> Self {
        MockDevice {
            base,
            current: AcquisitionSettings::default(),
            resolution: base,
            pushes: Vec::new(),
            fail: false,
        }
    }
}

impl Device for MockDevice {
    fn base_resolution(&self) -> u32 {
        self.base
    }

    fn update_settings(&mut self, settings: &AcquisitionSettings) -> Result<()> {
        if self.fail {
            bail!("usb transfer failed");
        }
        self.resolution = res::binning_to_resolution(settings.binning, self.base)?;
        self.current = *settings;
        self.pushes.push(*settings);
        Ok(())
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}

/// Full-size buffer with the given bins set
pub fn buffer_with(bins: &[(usize, u32)]) -> Vec<u32> {
    let mut buf = vec![0; BINS];
    for &(i, c) in bins {
        buf[i] = c;
    }
    buf
}
