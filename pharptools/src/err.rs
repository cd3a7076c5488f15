//! Error taxonomy for settings translation, histogram processing and export
//!
//! Every error here is recoverable: whatever failed, the session's current
//! settings, current axis and retained histogram are left as they were.
//! `Rejected` and `InvalidSettings` read differently on purpose, since the
//! first asks the operator to stop histogramming and the second to fix a value.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("resolution {resolution} ps is not a power-of-two multiple of {base} ps")]
    InvalidResolution { resolution: u32, base: u32 },

    #[error("base resolution {base} ps is outside the supported range")]
    UnsupportedBase { base: u32 },

    #[error("invalid setting: {field} = {value}")]
    InvalidSettings { field: &'static str, value: i64 },

    #[error("settings not pushed: {reason}")]
    Rejected { reason: &'static str },

    #[error("device error: {0:#}")]
    Device(anyhow::Error),

    #[error("histogram is empty")]
    EmptyHistogram,

    #[error("histogram has {got} bins, axis has {expected}")]
    BinCount { got: usize, expected: usize },

    #[error("histogram captured at {captured} ps, axis is for {current} ps")]
    StaleHistogram { captured: u32, current: u32 },

    #[error("no histogram to export yet")]
    NothingToExport,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
