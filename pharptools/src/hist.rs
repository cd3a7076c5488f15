//! Histogram time axis and trimming of raw histogram buffers

use crate::{Error, Result, PS_PER_S};

/// Bin start times (s) for one resolution
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    resolution: u32,
    times: Vec<f64>,
}

impl Axis {
    /// Resolution (ps) this axis was built for
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Build the time axis for `bins` bins of `resolution` ps each.
pub fn axis(resolution: u32, bins: usize) -> Axis {
    let times = (0..bins)
        .map(|i| (i as f64 * resolution as f64) / PS_PER_S)
        .collect();
    Axis { resolution, times }
}

/// A histogram with its permanently-empty tail removed
#[derive(Clone, Debug, PartialEq)]
pub struct Trimmed {
    pub resolution: u32,
    pub times: Vec<f64>,
    pub counts: Vec<u32>,
}

impl Trimmed {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (time, counts) pairs, the shape plotting wants
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(self.counts.iter())
            .map(|(&t, &c)| (t, c as f64))
            .collect()
    }

    /// Time span covered, first bin to last
    pub fn span(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Drop the trailing empty bins of a raw histogram.
///
/// The instrument always returns a full buffer. When the sync period is
/// shorter than `bins * resolution`, the bins past it can never fill, so the
/// output stops at the last non-zero bin (inclusive).
pub fn trim(buffer: &[u32], axis: &Axis) -> Result<Trimmed> {
    if buffer.len() != axis.len() {
        return Err(Error::BinCount {
            got: buffer.len(),
            expected: axis.len(),
        });
    }
    let last = buffer
        .iter()
        .rposition(|&c| c != 0)
        .ok_or(Error::EmptyHistogram)?;
    Ok(Trimmed {
        resolution: axis.resolution,
        times: axis.times[..=last].to_vec(),
        counts: buffer[..=last].to_vec(),
    })
}
