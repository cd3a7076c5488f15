//! Acquisition settings: what the operator asks for and what the device gets
//!
//! ## Raw settings
//!
//! `RawSettings` is the flat set of values as the operator edits them, with
//! the bin width given directly as a resolution in picoseconds.
//!
//! ## Device settings
//!
//! `AcquisitionSettings` is the exact parameter set the instrument takes,
//! with the resolution replaced by its binning exponent. A value of this type
//! has passed validation; once pushed it is never edited, only replaced by
//! the next successful push.
//!
//! Settings files are JSON encodings of `AcquisitionSettings`. Every field
//! is optional and falls back to the defaults, e.g.
//!
//! ```json
//! { "binning": 2, "sync_divider": 4, "acq_time_ms": 1000 }
//! ```

use crate::res;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Reason given when settings are pushed during histogramming
pub const IN_PROGRESS: &str = "acquisition in progress";

/// Sync divider values the hardware accepts
pub const SYNC_DIVIDERS: [i32; 4] = [1, 2, 4, 8];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
#[serde(default)]
pub struct AcquisitionSettings {
    pub binning:            u8,
    pub sync_offset:        i32,
    pub sync_divider:       u32,
    pub cfd0_zero_cross:    i32,
    pub cfd0_level:         i32,
    pub cfd1_zero_cross:    i32,
    pub cfd1_level:         i32,
    pub acq_time_ms:        u32,
}

/// Baseline settings, pushed at startup and on request
impl Default for AcquisitionSettings {
    fn default() -> Self {
        AcquisitionSettings {
            binning:            0,
            sync_offset:        0,
            sync_divider:       1,
            cfd0_zero_cross:    10,
            cfd0_level:         50,
            cfd1_zero_cross:    10,
            cfd1_level:         50,
            acq_time_ms:        500,
        }
    }
}

pub fn defaults() -> AcquisitionSettings {
    AcquisitionSettings::default()
}

/// Operator-facing settings, unvalidated
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawSettings {
    pub resolution:         u32,
    pub sync_offset:        i32,
    pub sync_divider:       i32,
    pub cfd0_zero_cross:    i32,
    pub cfd0_level:         i32,
    pub cfd1_zero_cross:    i32,
    pub cfd1_level:         i32,
    pub acq_time_ms:        i32,
}

impl RawSettings {
    /// The operator-facing view of device settings, e.g. read from a file.
    ///
    /// Fails if a value has no operator-facing equivalent.
    pub fn from_settings(s: &AcquisitionSettings, base: u32) -> Result<Self> {
        Ok(RawSettings {
            resolution:         res::binning_to_resolution(s.binning, base)?,
            sync_offset:        s.sync_offset,
            sync_divider:       to_i32("sync_divider", s.sync_divider)?,
            cfd0_zero_cross:    s.cfd0_zero_cross,
            cfd0_level:         s.cfd0_level,
            cfd1_zero_cross:    s.cfd1_zero_cross,
            cfd1_level:         s.cfd1_level,
            acq_time_ms:        to_i32("acq_time_ms", s.acq_time_ms)?,
        })
    }

    /// Baseline settings at the base resolution
    pub fn defaults(base: u32) -> Self {
        let d = defaults();
        RawSettings {
            resolution:         base,
            sync_offset:        d.sync_offset,
            sync_divider:       d.sync_divider as i32,
            cfd0_zero_cross:    d.cfd0_zero_cross,
            cfd0_level:         d.cfd0_level,
            cfd1_zero_cross:    d.cfd1_zero_cross,
            cfd1_level:         d.cfd1_level,
            acq_time_ms:        d.acq_time_ms as i32,
        }
    }
}

fn to_i32(field: &'static str, value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::InvalidSettings {
        field,
        value: value.into(),
    })
}

/// Validate raw settings and convert them to the device parameter set.
///
/// Nothing is converted while an acquisition is active: pushing settings
/// mid-histogram can leave the hardware in an undefined state.
pub fn translate(raw: &RawSettings, base: u32, active: bool) -> Result<AcquisitionSettings> {
    if active {
        return Err(Error::Rejected { reason: IN_PROGRESS });
    }
    let binning = res::resolution_to_binning(raw.resolution, base)?;
    if raw.sync_divider < 1 {
        return Err(Error::InvalidSettings {
            field: "sync_divider",
            value: raw.sync_divider.into(),
        });
    }
    if raw.acq_time_ms <= 0 {
        return Err(Error::InvalidSettings {
            field: "acq_time_ms",
            value: raw.acq_time_ms.into(),
        });
    }
    Ok(AcquisitionSettings {
        binning,
        sync_offset:        raw.sync_offset,
        sync_divider:       raw.sync_divider as u32,
        cfd0_zero_cross:    raw.cfd0_zero_cross,
        cfd0_level:         raw.cfd0_level,
        cfd1_zero_cross:    raw.cfd1_zero_cross,
        cfd1_level:         raw.cfd1_level,
        acq_time_ms:        raw.acq_time_ms as u32,
    })
}

/// Read a JSON settings file
pub fn from_reader(rdr: impl Read) -> anyhow::Result<AcquisitionSettings> {
    let s: AcquisitionSettings = serde_json::from_reader(rdr)?;
    if s.binning as usize >= res::STEPS {
        return Err(Error::InvalidSettings {
            field: "binning",
            value: s.binning.into(),
        }.into());
    }
    Ok(s)
}
