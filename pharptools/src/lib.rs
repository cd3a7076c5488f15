pub mod cfg;
pub mod cross;
pub mod dev;
pub mod err;
pub mod hist;
pub mod res;
pub mod ser;
pub mod session;

pub use err::{Error, Result};

use std::ops::Sub;
use std::sync::Arc;

/// Number of bins in every histogram the instrument returns
pub const BINS: usize = 65536;

/// Picoseconds per second
pub const PS_PER_S: f64 = 1e12;

/// A position in plot coordinates: time (s) on x, counts on y
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Live count rates vs. histogram accumulation
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Mode {
    Counting,
    Histogramming,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Counting => write!(f, "Counting"),
            Mode::Histogramming => write!(f, "Histogramming"),
        }
    }
}

/// Count rates (counts/s) on both inputs, emitted while counting
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CountEvent {
    pub ch0: f64,
    pub ch1: f64,
}

/// One full histogram read out of the instrument while histogramming.
///
/// `resolution` is the bin width (ps) the device was running at when the
/// buffer was read, so it can never be paired with an axis built for a
/// different resolution.
#[derive(Clone, Debug)]
pub struct HistogramEvent {
    pub buffer: Arc<[u32]>,
    pub resolution: u32,
}
