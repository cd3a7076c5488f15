//! Export of trimmed histograms to text
//!
//! Two columns, time (s) and counts, separated by a comma and a space, one
//! row per bin and no header:
//!
//! ```text
//! 0.0, 12
//! 4e-12, 15
//! 8e-12, 9
//! ```

use crate::hist::Trimmed;
use std::io::{self, Write};

/// Column separator
pub const DELIMITER: &str = ", ";

/// Write a trimmed histogram, one `time, counts` row per bin.
pub fn histogram(wtr: &mut impl Write, hist: &Trimmed) -> io::Result<()> {
    let mut buf = ryu::Buffer::new();
    for (t, c) in hist.times.iter().zip(hist.counts.iter()) {
        writeln!(wtr, "{}{}{}", buf.format(*t), DELIMITER, c)?;
    }
    Ok(())
}
